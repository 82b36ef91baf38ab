//! falang
//!
//! A small language for building, combining and querying finite automata
//! over labeled directed graphs. The pipeline runs source text through the
//! parser (`falang_parser`), a static type checker that annotates every
//! expression, and an evaluator that re-checks each value against its static
//! type while printing results as `<value> :: <type>`.
//!
//! # Example
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! falang::execute_code("print {1 .. 3};", &mut out, &mut err).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "{ 1, 2, 3 } :: SetType<IntType>\n"
//! );
//! assert!(err.is_empty());
//! ```

pub mod automata;
pub mod error;
pub mod executor;
pub mod interpret;
pub mod repl;
pub mod typer;
pub mod types;
pub mod value;

// Re-exports
pub use automata::Nfa;
pub use error::{ExecutionError, TypeError};
pub use executor::{Executor, ValueEnv};
pub use interpret::{does_belong_to_language, execute_code, type_program};
pub use repl::ReplSession;
pub use typer::{Checked, TypeEnv, Typer};
pub use types::Type;
pub use value::Value;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
