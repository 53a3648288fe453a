use std::fmt;

use thiserror::Error;

use super::token::Token;

/// A lexical defect found while scanning. Never fatal to the scan.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {message}")]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

impl LexError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        LexError {
            line,
            message: message.into(),
        }
    }
}

/// Every lexical error recorded by one scan
#[derive(Debug, Clone, PartialEq)]
pub struct LexErrors(pub Vec<LexError>);

impl fmt::Display for LexErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for LexErrors {}

/// Grammar rule a parse error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Expression,
    SelectExpr,
    ColumnExpr,
    JoinExpr,
    WhereExpr,
    GroupByExpr,
    OrderByExpr,
    ArithmeticExpr,
    JoinCondition,
    ComparisonExpr,
    ColumnOrderExpr,
    PrimaryExpr,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Production::Expression => "expression",
            Production::SelectExpr => "select expression",
            Production::ColumnExpr => "column expression",
            Production::JoinExpr => "join expression",
            Production::WhereExpr => "where clause",
            Production::GroupByExpr => "group by clause",
            Production::OrderByExpr => "order by clause",
            Production::ArithmeticExpr => "arithmetic expression",
            Production::JoinCondition => "join condition",
            Production::ComparisonExpr => "comparison",
            Production::ColumnOrderExpr => "column order",
            Production::PrimaryExpr => "primary expression",
        };
        f.write_str(name)
    }
}

/// A required token was missing where the grammar mandates one
#[derive(Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error in {production}: expected {expected}, found '{}'", found_text(.found))]
pub struct ParseError {
    pub line: usize,
    pub production: Production,
    pub expected: &'static str,
    pub found: Token,
}

fn found_text(token: &Token) -> String {
    if token.lexeme.is_empty() {
        "end of input".to_string()
    } else {
        token.lexeme.clone()
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Failure of a one-shot scan + parse
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("lexical errors:\n{0}")]
    Lex(LexErrors),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
