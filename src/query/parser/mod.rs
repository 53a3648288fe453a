// EliQL Parser Module
//
// This module is responsible for scanning EliQL queries and parsing them
// into an abstract syntax tree (AST) representation.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod references;
pub mod token;

// Export key types
pub use self::ast::{Expression, Visitor};
pub use self::error::{LexError, LexErrors, ParseError, ParseResult, Production, QueryError};
pub use self::lexer::{scan, ScanOutput, Scanner, ScannerConfig};
pub use self::parser::{parse_query, PartialParse, Parser};
pub use self::printer::AstPrinter;
pub use self::references::StreamCollector;
pub use self::token::{Literal, Token, TokenKind};
