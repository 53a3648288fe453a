use anyhow::Result;
use eliql::ast::{ColumnSource, JoinKind, Operand};
use eliql::query::parser::{Literal, Parser, Production, TokenKind};
use eliql::{parse_query, Expression, QueryError};

#[path = "../common/mod.rs"]
mod common;
use common::{col, parse_select};

#[test]
fn test_column_with_alias() -> Result<()> {
    for (column, alias) in [("x", "total"), ("price", "p"), ("user_id", "uid")] {
        let query = format!("SELECT {} AS \"{}\" FROM \"t\";", col("t", column), alias);
        let select = parse_select(&query)?;

        assert_eq!(select.columns().len(), 1);
        let expr = &select.columns()[0];
        assert!(expr.column().is_some());
        assert!(expr.arithmetic().is_none());
        assert!(expr.function().is_none());
        assert_eq!(
            expr.alias().unwrap().literal,
            Some(Literal::String(alias.to_string()))
        );
    }
    Ok(())
}

#[test]
fn test_where_scenario() -> Result<()> {
    let select = parse_select("SELECT \"a\".\"x\" FROM \"a\" WHERE \"a\".\"x\" > 5;")?;

    assert_eq!(select.table().table_name(), Some("a"));
    assert_eq!(select.columns().len(), 1);

    let comparisons = select.where_clause().unwrap().comparisons();
    assert_eq!(comparisons.len(), 1);
    assert_eq!(comparisons[0].comparator().lexeme, ">");
    match comparisons[0].right() {
        Operand::Primary(primary) => assert_eq!(primary.token().number(), Some(5.0)),
        Operand::Arithmetic(_) => panic!("Expected primary operand"),
    }
    Ok(())
}

#[test]
fn test_where_absent_without_keyword() -> Result<()> {
    let select = parse_select("SELECT \"a\".\"x\" FROM \"a\" GROUP BY \"a\".\"x\"")?;
    assert!(select.where_clause().is_none());
    assert!(select.group_by().is_some());
    Ok(())
}

#[test]
fn test_full_query() -> Result<()> {
    let query = "
        -- hourly revenue per region
        SELECT \"o\".\"region\", SUM(\"o\".\"amount\") AS \"revenue\", (\"o\".\"amount\" * 1.2) AS \"gross\"
        FROM \"o\"
        RIGHT JOIN \"r\" ON \"o\".\"region\" = \"r\".\"id\"
        WHERE \"o\".\"ts\" >= 100 AND NOT \"o\".\"status\" = 'void'
        GROUP BY \"o\".\"region\"
        ORDER BY \"o\".\"region\" ASC;
    ";
    let select = parse_select(query)?;

    assert_eq!(select.columns().len(), 3);
    assert!(matches!(select.columns()[1].source(), ColumnSource::Function(_)));
    assert!(matches!(select.columns()[2].source(), ColumnSource::Arithmetic(_)));
    assert_eq!(select.joins()[0].kind(), JoinKind::Right);
    assert_eq!(select.where_clause().unwrap().comparisons().len(), 2);
    assert_eq!(select.order_by().unwrap().column_orders().len(), 1);
    assert_eq!(select.table().line, 4);
    Ok(())
}

#[test]
fn test_union_root() -> Result<()> {
    let expr = parse_query("SELECT \"a\".\"x\" FROM \"a\" UNION SELECT \"b\".\"x\" FROM \"b\"")?;
    match expr {
        Expression::Union(union) => assert_eq!(union.selects().len(), 2),
        _ => panic!("Expected UNION expression"),
    }
    Ok(())
}

#[test]
fn test_parse_error_identifies_production_and_line() -> Result<()> {
    let err = match parse_query("SELECT \"a\".\"x\"\nFROM \"a\"\nJOIN \"b\" \"a\".\"x\" = \"b\".\"x\"") {
        Err(QueryError::Parse(err)) => err,
        other => panic!("Expected parse error, got {:?}", other),
    };

    assert_eq!(err.production, Production::JoinExpr);
    assert_eq!(err.expected, "ON");
    assert_eq!(err.found.kind, TokenKind::Column);
    assert_eq!(err.line, 3);
    Ok(())
}

#[test]
fn test_syntax_error() -> Result<()> {
    // Not a SELECT at all
    let mut parser = Parser::from_query("FROM \"a\"").map_err(|e| anyhow::anyhow!("{}", e))?;
    let err = parser.parse().unwrap_err();
    assert_eq!(err.production, Production::SelectExpr);
    Ok(())
}

#[test]
fn test_arithmetic_column_without_space_after_select() -> Result<()> {
    let select = parse_select("SELECT(\"a\".\"x\" + 1) FROM \"a\"")?;

    let arithmetic = select.columns()[0].arithmetic().unwrap();
    assert_eq!(arithmetic.operator().unwrap().kind, TokenKind::Plus);
    assert_eq!(arithmetic.right().unwrap().token().number(), Some(1.0));
    Ok(())
}
