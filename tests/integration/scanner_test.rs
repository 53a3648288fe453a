use anyhow::Result;
use eliql::query::parser::{scan, Literal, Scanner, TokenKind};

#[test]
fn test_compound_and_table_references() -> Result<()> {
    let (tokens, errors) = scan("SELECT \"t\".\"c\" FROM \"t\";");
    assert!(errors.is_empty());

    // Five tokens before end-of-input
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[0].kind, TokenKind::Select);
    assert_eq!(tokens[1].kind, TokenKind::Column);
    assert_eq!(
        tokens[1].literal,
        Some(Literal::Column {
            table: "t".to_string(),
            column: "c".to_string()
        })
    );
    assert_eq!(tokens[2].kind, TokenKind::From);
    assert_eq!(tokens[3].kind, TokenKind::Table);
    assert_eq!(tokens[3].literal, Some(Literal::String("t".to_string())));
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    assert_eq!(tokens[5].kind, TokenKind::Eof);
    assert!(tokens[5].lexeme.is_empty());

    Ok(())
}

#[test]
fn test_function_parameters_match_isolated_scan() -> Result<()> {
    let source = "SELECT CONCAT(\"s\".\"first\", ' ', TO_TIMEZONE(NOW(), 'UTC')) FROM \"s\"";
    let (tokens, errors) = scan(source);
    assert!(errors.is_empty());

    let call = &tokens[1];
    assert_eq!(call.kind, TokenKind::ConcatFunc);

    // Re-scan exactly the text between the call's parentheses
    let open = source.find('(').unwrap();
    let close = source.rfind(')').unwrap();
    let (isolated, isolated_errors) = scan(&source[open + 1..close]);
    assert!(isolated_errors.is_empty());

    let params = call.parameters().unwrap();
    assert_eq!(params, &isolated[..isolated.len() - 1]);

    Ok(())
}

#[test]
fn test_max_over_column() -> Result<()> {
    let (tokens, errors) = scan("MAX(\"foo\".\"bar\")");
    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::MaxFunc);

    let params = tokens[0].parameters().unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].kind, TokenKind::Column);

    Ok(())
}

#[test]
fn test_numbers_are_floats() -> Result<()> {
    let (tokens, _) = scan("67.89 67");
    assert_eq!(tokens[0].number(), Some(67.89));
    assert_eq!(tokens[1].number(), Some(67.0));
    Ok(())
}

#[test]
fn test_errors_collected_and_lines_tracked() -> Result<()> {
    let query = "SELECT \"a\".\"x\"\nFROM \"a\"\nWHERE \"a\".\"x\" ! 5\nAND 'open";
    let output = Scanner::new(query).scan_tokens();

    assert_eq!(output.errors.len(), 2);
    assert_eq!(output.errors[0].line, 3);
    assert_eq!(output.errors[1].line, 4);

    // Scanning still produced the well-formed parts
    let where_token = output.tokens.iter().find(|t| t.kind == TokenKind::Where).unwrap();
    assert_eq!(where_token.line, 3);
    assert_eq!(output.tokens.last().unwrap().kind, TokenKind::Eof);

    Ok(())
}

#[test]
fn test_multiline_string_keeps_start_line() -> Result<()> {
    let (tokens, errors) = scan("'one\ntwo' FROM");
    assert!(errors.is_empty());
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 2);
    Ok(())
}
