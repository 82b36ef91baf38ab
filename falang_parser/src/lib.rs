//! falang_parser
//!
//! Lexer and recursive descent parser for the falang automata query
//! language. Produces the AST consumed by the type checker and evaluator in
//! the `falang` crate.
//!
//! # Example
//!
//! ```
//! use falang_parser::parse_with_errors;
//!
//! let (program, errors) = parse_with_errors("print 5;");
//! assert!(errors.is_empty());
//! assert_eq!(program.stmts.len(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

// Re-exports
pub use ast::{Expr, ExprKind, Lambda, NodeId, Pattern, PatternKind, Program, Stmt, StmtKind};
pub use error::{ParseError, ParseErrors, ParseResult};
pub use lexer::{Lexer, SpannedToken};
pub use parser::Parser;
pub use span::{SourceMap, Span};
pub use token::Token;

/// Parse falang source code into a program.
///
/// Returns the first syntax error if the source does not parse cleanly.
pub fn parse(source: &str) -> ParseResult<Program> {
    let (program, errors) = parser::parse(source);
    match errors.into_iter().next() {
        None => Ok(program),
        Some(error) => Err(error),
    }
}

/// Parse falang source code with error recovery.
///
/// Returns a program (containing every statement that parsed) along with the
/// list of collected errors.
pub fn parse_with_errors(source: &str) -> (Program, ParseErrors) {
    parser::parse(source)
}

/// Tokenize falang source code.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken<'_>, ParseError>> {
    lexer::tokenize(source)
}

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
