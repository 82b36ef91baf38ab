//! The type algebra of the language.
//!
//! A closed tagged union with structural equality. `Set` and `Fa` are
//! parametric; a tuple is *uniform* when all of its components share one
//! type, and only uniform tuples have an element type. Lambdas are
//! first-class types but never first-class values.
//!
//! Binder patterns are **not** types: they live in the AST and in the
//! checker's binding logic and never appear in the expression type map.

use std::fmt;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// The type of statements.
    None,
    Int,
    Bool,
    Str,
    /// Homogeneous set.
    Set(Box<Type>),
    /// Heterogeneous ordered product, n >= 1.
    Tuple(Vec<Type>),
    /// Finite automaton with the given vertex type. The alphabet is always
    /// `Str`.
    Fa(Box<Type>),
    /// The type of a `with`-clause lambda.
    Lambda { param: Box<Type>, ret: Box<Type> },
}

impl Type {
    pub fn set_of(element: Type) -> Type {
        Type::Set(Box::new(element))
    }

    pub fn fa_of(vertex: Type) -> Type {
        Type::Fa(Box::new(vertex))
    }

    /// The default automaton type: integer vertices.
    pub fn fa_int() -> Type {
        Type::fa_of(Type::Int)
    }

    /// True for a tuple whose components all share one type.
    pub fn is_uniform_tuple(&self) -> bool {
        match self {
            Type::Tuple(items) => items.windows(2).all(|w| w[0] == w[1]),
            _ => false,
        }
    }

    /// Element type of a set or a uniform tuple.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Set(element) => Some(element),
            Type::Tuple(items) if self.is_uniform_tuple() => items.first(),
            _ => None,
        }
    }

    /// Does a runtime value have the shape of this type?
    ///
    /// Recursive through sets, tuples and automaton state values; backs the
    /// evaluator's check that every computed value agrees with its static
    /// type.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Type::Int, Value::Int(_)) => true,
            (Type::Bool, Value::Bool(_)) => true,
            (Type::Str, Value::Str(_)) => true,
            (Type::Set(element), Value::Set(items)) => {
                items.iter().all(|item| element.matches(item))
            }
            (Type::Tuple(types), Value::Tuple(items)) => {
                types.len() == items.len()
                    && types.iter().zip(items).all(|(ty, item)| ty.matches(item))
            }
            (Type::Fa(vertex), Value::Fa(nfa)) => {
                nfa.states().iter().all(|state| vertex.matches(state))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::None => f.write_str("NoneType"),
            Type::Int => f.write_str("IntType"),
            Type::Bool => f.write_str("BoolType"),
            Type::Str => f.write_str("StringType"),
            Type::Set(element) => write!(f, "SetType<{element}>"),
            Type::Tuple(items) => {
                f.write_str("TupleType<")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(">")
            }
            Type::Fa(vertex) => write!(f, "FAType<{vertex}>"),
            Type::Lambda { param, ret } => write!(f, "LambdaType<{param} -> {ret}>"),
        }
    }
}
