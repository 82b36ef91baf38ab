//! Typing and execution errors.
//!
//! Three error kinds flow through the pipeline: syntax errors stay in the
//! parser crate, `TypeError` comes out of the checker, `ExecutionError` out
//! of the evaluator. All are fatal to the current program; the driver
//! prefixes the fixed diagnostic banners.

use thiserror::Error;

use crate::types::Type;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("{0} variable wasn't defined")]
    UndefinedVariable(String),

    #[error("Binding of {0} already exists")]
    AlreadyBound(String),

    #[error("tuple literals contain only literal values, variable {0} is not permitted inside a tuple literal")]
    VarInTupleLiteral(String),

    #[error("Load expression must contain String literal or String-typed variable")]
    BadLoadSource,

    #[error("{operation}: FAType<...> was expected not {found}")]
    ExpectedFa {
        operation: &'static str,
        found: Type,
    },

    #[error("{operation}: {expected} was expected not {found}")]
    Mismatch {
        operation: &'static str,
        expected: Type,
        found: Type,
    },

    #[error("{operation}: operation is not possible between {lhs} and {rhs}")]
    BadOperands {
        operation: &'static str,
        lhs: Type,
        rhs: Type,
    },

    #[error("Kleene closure is possible only with FA, got {0}")]
    KleeneOnNonFa(Type),

    #[error("in: operation is possible with sets and uniform tuples, got {0}")]
    BadMembershipSource(Type),

    #[error("its impossible to check value of type {item} in {collection}")]
    MembershipMismatch { item: Type, collection: Type },

    #[error("lambda cannot be bound to the type {0}")]
    BadLambdaSource(Type),

    #[error("Tuple must be uniform to be bound to lambda, got {0}")]
    NonUniformTuple(Type),

    #[error("filter lambda must be a predicate (return bool), got {0}")]
    NotAPredicate(Type),

    #[error("Binding {pattern} to {found}: pattern and tuple must be the same length")]
    PatternArity { pattern: String, found: Type },

    #[error("Binding {pattern} to {found} is impossible")]
    PatternShape { pattern: String, found: Type },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    /// The defensive invariant: a computed value disagrees with the type the
    /// checker assigned to its node. Indicates a checker/evaluator mismatch.
    #[error("value {value} does not match its declared type {expected}")]
    ShapeMismatch { expected: Type, value: String },

    #[error("Union possible only for int states")]
    NonIntStates,

    #[error("vertices must be convertible to int")]
    NonIntVertices,

    #[error("failed to load graph '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("variable {0} has no value")]
    MissingValue(String),

    #[error("output stream failure: {0}")]
    Output(String),

    /// Unreachable-branch guard: the checker should have rejected the
    /// program before this state could be reached.
    #[error("internal error: {0}")]
    Internal(&'static str),
}
