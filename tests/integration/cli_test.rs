use anyhow::Result;
use std::process::Command;

fn eliql() -> Command {
    Command::new(env!("CARGO_BIN_EXE_eliql"))
}

/// Test that the CLI prints the parsed tree
#[test]
fn test_cli_ast_command() -> Result<()> {
    let output = eliql()
        .args(["ast", "SELECT \"a\".\"x\" FROM \"a\" WHERE \"a\".\"x\" > 5;"])
        .output()?;

    assert!(output.status.success(), "CLI ast command failed");
    let output_str = String::from_utf8(output.stdout)?;
    assert_eq!(
        output_str.trim(),
        "(select (columns (column a.x)) (from a) (where (> a.x 5)))"
    );
    Ok(())
}

/// Test that token output can be read back as JSON
#[test]
fn test_cli_tokens_json() -> Result<()> {
    let output = eliql().args(["tokens", "--json", "SELECT 1.5"]).output()?;

    assert!(output.status.success(), "CLI tokens command failed");
    let tokens: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let tokens = tokens.as_array().expect("token array");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0]["kind"], "Select");
    assert_eq!(tokens[1]["literal"]["Number"], 1.5);
    assert_eq!(tokens[2]["kind"], "Eof");
    Ok(())
}

/// Test that lexical errors fail the command and are reported on stderr
#[test]
fn test_cli_reports_errors() -> Result<()> {
    let output = eliql().args(["ast", "SELECT bogus FROM \"a\""]).output()?;

    assert!(!output.status.success());
    let err_str = String::from_utf8(output.stderr)?;
    assert!(err_str.contains("[line 1] Error: Unknown keyword 'bogus'."));
    Ok(())
}

#[test]
fn test_cli_streams_command() -> Result<()> {
    let output = eliql()
        .args(["streams", "SELECT \"t\".\"x\" FROM \"t\" LEFT JOIN \"u\" ON \"t\".\"id\" = \"u\".\"id\""])
        .output()?;

    assert!(output.status.success());
    let lines: Vec<String> = String::from_utf8(output.stdout)?
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(lines, vec!["t", "u"]);
    Ok(())
}
