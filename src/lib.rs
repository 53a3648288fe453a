// EliQL Query Front End

pub mod query;

// Re-export key items for convenient access
pub use query::parser::ast;
pub use query::parser::{
    parse_query, AstPrinter, Expression, LexError, ParseError, Parser, QueryError, Scanner,
    ScannerConfig, StreamCollector, Token, TokenKind, Visitor,
};
