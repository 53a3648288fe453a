// EliQL Query Module
//
// Front end for EliQL: scanning, parsing and AST traversal. Executing a
// parsed query against record streams happens outside this crate.

pub mod parser;

// Export key public interfaces
pub use parser::{parse_query, Parser, Scanner};
