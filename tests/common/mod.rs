use anyhow::{anyhow, Result};
use eliql::ast::SelectExpression;
use eliql::{parse_query, Expression};

// Parse a query that must produce a single SELECT root
#[allow(dead_code)]
pub fn parse_select(query: &str) -> Result<SelectExpression> {
    match parse_query(query).map_err(|e| anyhow!("Query error: {}", e))? {
        Expression::Select(select) => Ok(select),
        other => Err(anyhow!("Expected SELECT expression, got {}", other)),
    }
}

// Render a query through the reference printer
#[allow(dead_code)]
pub fn render(query: &str) -> Result<String> {
    let expr = parse_query(query).map_err(|e| anyhow!("Query error: {}", e))?;
    Ok(expr.to_string())
}

// Quote a compound column reference
#[allow(dead_code)]
pub fn col(table: &str, column: &str) -> String {
    format!("\"{}\".\"{}\"", table, column)
}
