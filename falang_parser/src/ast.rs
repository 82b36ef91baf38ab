//! Abstract syntax tree for falang programs.
//!
//! The parser assigns every statement, expression and lambda a `NodeId`;
//! later pipeline stages key their type and operator annotations on it.
//! Patterns and literal values carry spans only: they are binder shapes and
//! literal data, not annotated expressions.

use serde::Serialize;
use std::fmt;

use crate::span::Span;

/// Identifier for an annotatable AST node.
pub type NodeId = u32;

/// A parsed program: a sequence of statements.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    /// JSON rendering for the `--dump-ast --json` debugging mode.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Stmt {
    pub id: NodeId,
    pub span: Span,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, Serialize)]
pub enum StmtKind {
    /// `let <pattern> = <expr> ;`
    Bind { pattern: Pattern, value: Expr },
    /// `print <expr> ;`
    Print { value: Expr },
}

/// A binder shape: a bare name or a nested tuple of patterns.
#[derive(Debug, Clone, Serialize)]
pub struct Pattern {
    pub span: Span,
    pub kind: PatternKind,
}

#[derive(Debug, Clone, Serialize)]
pub enum PatternKind {
    Name(String),
    Tuple(Vec<Pattern>),
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PatternKind::Name(name) => f.write_str(name),
            PatternKind::Tuple(parts) => {
                f.write_str("[ ")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(" ]")
            }
        }
    }
}

/// A literal value. Tuple literals nest values only; an identifier in a
/// literal position parses as `Var` and is rejected by the type checker.
#[derive(Debug, Clone, Serialize)]
pub struct Val {
    pub span: Span,
    pub kind: ValKind,
}

#[derive(Debug, Clone, Serialize)]
pub enum ValKind {
    Int(i64),
    Str(String),
    IntSet(SetLiteral),
    Tuple(Vec<Val>),
    Var(String),
}

/// The small set-literal grammar: `{}`, `{i1, i2, …}`, `{lo..hi}`.
#[derive(Debug, Clone, Serialize)]
pub enum SetLiteral {
    Empty,
    List(Vec<i64>),
    /// Inclusive on both ends when `lo <= hi`, otherwise empty.
    Range { lo: i64, hi: i64 },
}

/// `\ <pattern> -> <expr>`, legal only in `with` clauses of map/filter.
#[derive(Debug, Clone, Serialize)]
pub struct Lambda {
    pub id: NodeId,
    pub span: Span,
    pub pattern: Pattern,
    pub body: Box<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, Serialize)]
pub enum ExprKind {
    Var(String),
    Val(Val),
    /// `load "<path>"` / `load <var>`
    Load(LoadSource),
    GetStarts(Box<Expr>),
    GetFinals(Box<Expr>),
    GetVertices(Box<Expr>),
    GetEdges(Box<Expr>),
    GetLabels(Box<Expr>),
    GetReachable(Box<Expr>),
    /// `set_starts of <fa> to <states>`
    SetStarts { fa: Box<Expr>, states: Box<Expr> },
    SetFinals { fa: Box<Expr>, states: Box<Expr> },
    /// `add_starts <states> to <fa>`
    AddStarts { states: Box<Expr>, fa: Box<Expr> },
    AddFinals { states: Box<Expr>, fa: Box<Expr> },
    Map { over: Box<Expr>, lambda: Lambda },
    Filter { over: Box<Expr>, lambda: Lambda },
    /// `<lhs> | <rhs>`
    Union { lhs: Box<Expr>, rhs: Box<Expr> },
    /// `<lhs> ++ <rhs>`
    Concat { lhs: Box<Expr>, rhs: Box<Expr> },
    /// `<lhs> & <rhs>`
    Product { lhs: Box<Expr>, rhs: Box<Expr> },
    /// `<expr> *`
    Kleene(Box<Expr>),
    /// `<item> in <collection>`
    In {
        item: Box<Expr>,
        collection: Box<Expr>,
    },
    /// `( <expr> )`
    Braced(Box<Expr>),
}

#[derive(Debug, Clone, Serialize)]
pub enum LoadSource {
    Literal(String),
    Var(String),
}
