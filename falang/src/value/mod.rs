//! Runtime values.
//!
//! Equality, ordering and hashing are structural, so sets of tuples, sets of
//! sets and sets of automaton states all behave as mathematical sets. Sets
//! are ordered (`BTreeSet`) to make that structure cheap. Values are
//! immutable after construction; every operation returns a fresh value.

use std::collections::BTreeSet;
use std::fmt;

use crate::automata::Nfa;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Set(BTreeSet<Value>),
    Tuple(Vec<Value>),
    Fa(Nfa),
}

impl Value {
    pub fn set_from<I>(items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Set(items.into_iter().collect())
    }

    /// Convenience for integer sets, used heavily in tests.
    pub fn int_set<I>(items: I) -> Value
    where
        I: IntoIterator<Item = i64>,
    {
        Value::Set(items.into_iter().map(Value::Int).collect())
    }

    pub fn pair(first: Value, second: Value) -> Value {
        Value::Tuple(vec![first, second])
    }
}

fn write_joined<'a, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: Iterator<Item = &'a Value>,
{
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Bool(value) => f.write_str(if *value { "True" } else { "False" }),
            Value::Str(value) => f.write_str(value),
            Value::Set(items) => {
                if items.is_empty() {
                    return f.write_str("{ }");
                }
                f.write_str("{ ")?;
                write_joined(f, items.iter())?;
                f.write_str(" }")
            }
            Value::Tuple(items) => {
                f.write_str("[ ")?;
                write_joined(f, items.iter())?;
                f.write_str(" ]")
            }
            Value::Fa(nfa) => {
                // Debug rendering only; programs observe automata through
                // the extractors.
                writeln!(f, "FA with {} states", nfa.states().len())?;
                f.write_str("starts: ")?;
                fmt_state_set(f, nfa.starts())?;
                f.write_str("\nfinals: ")?;
                fmt_state_set(f, nfa.finals())?;
                f.write_str("\nsymbols: { ")?;
                for (i, symbol) in nfa.symbols().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(symbol)?;
                }
                f.write_str(" }")
            }
        }
    }
}

fn fmt_state_set(f: &mut fmt::Formatter<'_>, states: &BTreeSet<Value>) -> fmt::Result {
    f.write_str("{ ")?;
    write_joined(f, states.iter())?;
    f.write_str(" }")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_display() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Bool(false).to_string(), "False");
        assert_eq!(Value::Str("hi".to_string()).to_string(), "hi");
    }

    #[test]
    fn test_set_display_is_sorted() {
        assert_eq!(Value::int_set([3, 1, 2]).to_string(), "{ 1, 2, 3 }");
        assert_eq!(Value::int_set([]).to_string(), "{ }");
    }

    #[test]
    fn test_tuple_display() {
        let tuple = Value::Tuple(vec![
            Value::Int(1),
            Value::Str("Hello".to_string()),
            Value::int_set([4, 5]),
        ]);
        assert_eq!(tuple.to_string(), "[ 1, Hello, { 4, 5 } ]");
    }

    #[test]
    fn test_structural_set_of_tuples() {
        let a = Value::pair(Value::Int(1), Value::Int(2));
        let b = Value::pair(Value::Int(1), Value::Int(2));
        let set = Value::set_from([a, b]);
        // duplicates collapse structurally
        assert_eq!(set.to_string(), "{ [ 1, 2 ] }");
    }

    #[test]
    fn test_set_of_sets() {
        let inner = Value::int_set([1]);
        let set = Value::set_from([inner.clone(), inner]);
        assert_eq!(set.to_string(), "{ { 1 } }");
    }
}
