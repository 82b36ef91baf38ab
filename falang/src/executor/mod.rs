//! The evaluator.
//!
//! A second pass over the same AST the checker annotated. Every computed
//! expression value is re-checked against its static type (the defensive
//! invariant); overloaded operators dispatch on the `ResolvedOp` the checker
//! recorded, so no typing decision is ever re-made here.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::io::Write;

use falang_parser::ast::{
    Expr, ExprKind, Lambda, LoadSource, Pattern, PatternKind, Program, SetLiteral, Stmt,
    StmtKind, Val, ValKind,
};

use crate::automata::{self, Nfa};
use crate::error::ExecutionError;
use crate::typer::{Checked, OpMap, ResolvedOp, TypeMap};
use crate::value::Value;

/// Name → value bindings, mirroring the scope discipline of `TypeEnv`.
#[derive(Debug, Clone, Default)]
pub struct ValueEnv {
    globals: HashMap<String, Value>,
    scopes: Vec<HashMap<String, Value>>,
}

impl ValueEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .or_else(|| self.globals.get(name))
    }

    /// The checker already rejected redeclarations; a global bind just
    /// inserts.
    pub fn bind_global(&mut self, name: &str, value: Value) {
        self.globals.insert(name.to_string(), value);
    }

    fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn bind_local(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        }
    }
}

/// Walks the program, evaluating statements in order and writing `print`
/// output to `out`.
pub struct Executor<'a, W: Write> {
    env: &'a mut ValueEnv,
    types: &'a TypeMap,
    ops: &'a OpMap,
    out: &'a mut W,
}

impl<W: Write> fmt::Debug for Executor<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}

impl<'a, W: Write> Executor<'a, W> {
    pub fn new(env: &'a mut ValueEnv, checked: &'a Checked, out: &'a mut W) -> Self {
        Self {
            env,
            types: &checked.types,
            ops: &checked.ops,
            out,
        }
    }

    pub fn run_program(&mut self, program: &Program) -> Result<(), ExecutionError> {
        for stmt in &program.stmts {
            self.run_stmt(stmt)?;
        }
        Ok(())
    }

    fn run_stmt(&mut self, stmt: &Stmt) -> Result<(), ExecutionError> {
        match &stmt.kind {
            StmtKind::Bind { pattern, value } => {
                let evaluated = self.eval_expr(value)?;
                self.bind_pattern(pattern, evaluated, false)
            }
            StmtKind::Print { value } => {
                let evaluated = self.eval_expr(value)?;
                let ty = self
                    .types
                    .get(&value.id)
                    .ok_or(ExecutionError::Internal("printed expression was never typed"))?;
                writeln!(self.out, "{evaluated} :: {ty}")
                    .map_err(|e| ExecutionError::Output(e.to_string()))
            }
        }
    }

    fn bind_pattern(
        &mut self,
        pattern: &Pattern,
        value: Value,
        local: bool,
    ) -> Result<(), ExecutionError> {
        match &pattern.kind {
            PatternKind::Name(name) => {
                if local {
                    self.env.bind_local(name, value);
                } else {
                    self.env.bind_global(name, value);
                }
                Ok(())
            }
            PatternKind::Tuple(parts) => {
                let Value::Tuple(items) = value else {
                    return Err(ExecutionError::Internal(
                        "pattern and value shape diverged from the checker",
                    ));
                };
                if parts.len() != items.len() {
                    return Err(ExecutionError::Internal(
                        "pattern and value shape diverged from the checker",
                    ));
                }
                for (part, item) in parts.iter().zip(items) {
                    self.bind_pattern(part, item, local)?;
                }
                Ok(())
            }
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, ExecutionError> {
        let value = match &expr.kind {
            ExprKind::Var(name) => self
                .env
                .lookup(name)
                .cloned()
                .ok_or_else(|| ExecutionError::MissingValue(name.clone()))?,

            ExprKind::Val(val) => eval_val(val)?,

            ExprKind::Load(source) => {
                let path = match source {
                    LoadSource::Literal(path) => path.clone(),
                    LoadSource::Var(name) => match self.env.lookup(name) {
                        Some(Value::Str(path)) => path.clone(),
                        _ => return Err(ExecutionError::MissingValue(name.clone())),
                    },
                };
                Value::Fa(automata::load_graph(&path)?)
            }

            ExprKind::GetStarts(fa) => Value::Set(self.eval_fa(fa)?.starts().clone()),
            ExprKind::GetFinals(fa) => Value::Set(self.eval_fa(fa)?.finals().clone()),
            ExprKind::GetVertices(fa) => Value::Set(self.eval_fa(fa)?.states().clone()),
            ExprKind::GetLabels(fa) => Value::Set(
                self.eval_fa(fa)?
                    .symbols()
                    .into_iter()
                    .map(Value::Str)
                    .collect(),
            ),
            ExprKind::GetEdges(fa) => Value::Set(self.eval_fa(fa)?.edges()),
            ExprKind::GetReachable(fa) => Value::Set(
                automata::reachable(&self.eval_fa(fa)?)
                    .into_iter()
                    .map(|(from, to)| Value::pair(from, to))
                    .collect(),
            ),

            ExprKind::SetStarts { fa, states } => {
                let nfa = self.eval_fa(fa)?;
                let states = self.eval_set(states)?;
                Value::Fa(nfa.with_starts(states))
            }
            ExprKind::SetFinals { fa, states } => {
                let nfa = self.eval_fa(fa)?;
                let states = self.eval_set(states)?;
                Value::Fa(nfa.with_finals(states))
            }
            ExprKind::AddStarts { states, fa } => {
                let states = self.eval_set(states)?;
                let nfa = self.eval_fa(fa)?;
                Value::Fa(nfa.add_starts(&states))
            }
            ExprKind::AddFinals { states, fa } => {
                let states = self.eval_set(states)?;
                let nfa = self.eval_fa(fa)?;
                Value::Fa(nfa.add_finals(&states))
            }

            ExprKind::Union { lhs, rhs }
            | ExprKind::Concat { lhs, rhs }
            | ExprKind::Product { lhs, rhs } => self.eval_binary(expr, lhs, rhs)?,

            ExprKind::Kleene(inner) => Value::Fa(automata::closure(&self.eval_fa(inner)?)),

            ExprKind::In { item, collection } => {
                let item = self.eval_expr(item)?;
                let contains = match self.eval_expr(collection)? {
                    Value::Set(items) => items.contains(&item),
                    Value::Tuple(items) => items.contains(&item),
                    _ => {
                        return Err(ExecutionError::Internal(
                            "membership over a non-collection survived the checker",
                        ))
                    }
                };
                Value::Bool(contains)
            }

            ExprKind::Map { over, lambda } => {
                let mut result = BTreeSet::new();
                for element in self.eval_elements(over)? {
                    result.insert(self.eval_lambda(lambda, element)?);
                }
                Value::Set(result)
            }
            ExprKind::Filter { over, lambda } => {
                let mut result = BTreeSet::new();
                for element in self.eval_elements(over)? {
                    if self.eval_lambda(lambda, element.clone())? == Value::Bool(true) {
                        result.insert(element);
                    }
                }
                Value::Set(result)
            }

            ExprKind::Braced(inner) => self.eval_expr(inner)?,
        };

        // Defensive invariant: the runtime shape must agree with the static
        // type the checker assigned to this node.
        let ty = self
            .types
            .get(&expr.id)
            .ok_or(ExecutionError::Internal("expression was never typed"))?;
        if !ty.matches(&value) {
            return Err(ExecutionError::ShapeMismatch {
                expected: ty.clone(),
                value: value.to_string(),
            });
        }
        Ok(value)
    }

    fn eval_binary(
        &mut self,
        expr: &Expr,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Result<Value, ExecutionError> {
        let op = *self
            .ops
            .get(&expr.id)
            .ok_or(ExecutionError::Internal("operator was never resolved"))?;
        let lhs = self.eval_expr(lhs)?;
        let rhs = self.eval_expr(rhs)?;

        Ok(match op {
            ResolvedOp::StringConcat => match (lhs, rhs) {
                (Value::Str(a), Value::Str(b)) => Value::Str(a + &b),
                _ => {
                    return Err(ExecutionError::Internal(
                        "string concatenation over non-strings",
                    ))
                }
            },
            ResolvedOp::FaConcat => {
                Value::Fa(automata::concat(&lift(lhs)?, &lift(rhs)?)?)
            }
            ResolvedOp::SetUnion => match (lhs, rhs) {
                (Value::Set(a), Value::Set(b)) => Value::Set(a.into_iter().chain(b).collect()),
                _ => return Err(ExecutionError::Internal("set union over non-sets")),
            },
            ResolvedOp::FaUnion => Value::Fa(automata::union(&lift(lhs)?, &lift(rhs)?)?),
            ResolvedOp::SetIntersect => match (lhs, rhs) {
                (Value::Set(a), Value::Set(b)) => {
                    Value::Set(a.intersection(&b).cloned().collect())
                }
                _ => return Err(ExecutionError::Internal("set intersection over non-sets")),
            },
            ResolvedOp::FaProduct => {
                Value::Fa(automata::product(&lift(lhs)?, &lift(rhs)?))
            }
        })
    }

    fn eval_fa(&mut self, expr: &Expr) -> Result<Nfa, ExecutionError> {
        match self.eval_expr(expr)? {
            Value::Fa(nfa) => Ok(nfa),
            _ => Err(ExecutionError::Internal(
                "the checker guaranteed an automaton here",
            )),
        }
    }

    fn eval_set(&mut self, expr: &Expr) -> Result<BTreeSet<Value>, ExecutionError> {
        match self.eval_expr(expr)? {
            Value::Set(items) => Ok(items),
            _ => Err(ExecutionError::Internal(
                "the checker guaranteed a set here",
            )),
        }
    }

    /// Elements of the collection driving a `map`/`filter`, in order.
    fn eval_elements(&mut self, expr: &Expr) -> Result<Vec<Value>, ExecutionError> {
        match self.eval_expr(expr)? {
            Value::Set(items) => Ok(items.into_iter().collect()),
            Value::Tuple(items) => Ok(items),
            _ => Err(ExecutionError::Internal(
                "the checker guaranteed a collection here",
            )),
        }
    }

    /// Bind the pattern to one element in a fresh scope and evaluate the
    /// body.
    fn eval_lambda(&mut self, lambda: &Lambda, element: Value) -> Result<Value, ExecutionError> {
        self.env.push_scope();
        let result = self
            .bind_pattern(&lambda.pattern, element, true)
            .and_then(|_| self.eval_expr(&lambda.body));
        self.env.pop_scope();
        result
    }
}

fn eval_val(val: &Val) -> Result<Value, ExecutionError> {
    match &val.kind {
        ValKind::Int(value) => Ok(Value::Int(*value)),
        ValKind::Str(value) => Ok(Value::Str(value.clone())),
        ValKind::IntSet(literal) => Ok(eval_set_literal(literal)),
        ValKind::Tuple(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(eval_val(item)?);
            }
            Ok(Value::Tuple(values))
        }
        ValKind::Var(_) => Err(ExecutionError::Internal(
            "variable in a literal position survived the checker",
        )),
    }
}

fn eval_set_literal(literal: &SetLiteral) -> Value {
    match literal {
        SetLiteral::Empty => Value::Set(BTreeSet::new()),
        SetLiteral::List(items) => Value::int_set(items.iter().copied()),
        // inclusive on both ends; empty when lo > hi
        SetLiteral::Range { lo, hi } => Value::int_set(*lo..=*hi),
    }
}

/// Lift a language operand: strings become single-word automata.
fn lift(value: Value) -> Result<Nfa, ExecutionError> {
    match value {
        Value::Fa(nfa) => Ok(nfa),
        Value::Str(symbol) => Ok(Nfa::from_symbol(&symbol)),
        _ => Err(ExecutionError::Internal(
            "language operand was neither string nor automaton",
        )),
    }
}
