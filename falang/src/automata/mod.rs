//! ε-NFA over string symbols with opaque state values.
//!
//! States carry `Value`s: plain integers after `load` and the string lift,
//! pairs after a tensor product. The regular operations live in [`ops`], the
//! boolean-matrix kernels in [`matrix`], and the DOT reader in [`graph`].

mod graph;
mod matrix;
mod ops;

pub use graph::load_graph;
pub use matrix::BoolMatrix;
pub use ops::{closure, concat, product, reachable, union};

use std::collections::BTreeSet;

use crate::error::ExecutionError;
use crate::value::Value;

/// One transition. `label == None` is an ε-move.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub from: Value,
    pub label: Option<String>,
    pub to: Value,
}

/// An ε-NFA. Duplicate transitions collapse; isolated states (mentioned by
/// no transition) are representable.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nfa {
    states: BTreeSet<Value>,
    transitions: BTreeSet<Transition>,
    starts: BTreeSet<Value>,
    finals: BTreeSet<Value>,
}

impl Nfa {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single-word automaton `0 -symbol-> 1`.
    pub fn from_symbol(symbol: &str) -> Self {
        let mut nfa = Nfa::new();
        nfa.add_transition(Value::Int(0), Some(symbol.to_string()), Value::Int(1));
        nfa.add_start(Value::Int(0));
        nfa.add_final(Value::Int(1));
        nfa
    }

    pub fn add_state(&mut self, state: Value) {
        self.states.insert(state);
    }

    pub fn add_transition(&mut self, from: Value, label: Option<String>, to: Value) {
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.transitions.insert(Transition { from, label, to });
    }

    pub fn add_start(&mut self, state: Value) {
        self.states.insert(state.clone());
        self.starts.insert(state);
    }

    pub fn add_final(&mut self, state: Value) {
        self.states.insert(state.clone());
        self.finals.insert(state);
    }

    pub fn states(&self) -> &BTreeSet<Value> {
        &self.states
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }

    pub fn starts(&self) -> &BTreeSet<Value> {
        &self.starts
    }

    pub fn finals(&self) -> &BTreeSet<Value> {
        &self.finals
    }

    /// The alphabet: every transition label, ε excluded.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.transitions
            .iter()
            .filter_map(|t| t.label.clone())
            .collect()
    }

    /// Labeled edges as `[from, label, to]` tuples; ε-moves are not edges.
    pub fn edges(&self) -> BTreeSet<Value> {
        self.transitions
            .iter()
            .filter_map(|t| {
                t.label.as_ref().map(|label| {
                    Value::Tuple(vec![
                        t.from.clone(),
                        Value::Str(label.clone()),
                        t.to.clone(),
                    ])
                })
            })
            .collect()
    }

    /// Fresh automaton with the start set replaced.
    pub fn with_starts(&self, starts: BTreeSet<Value>) -> Nfa {
        let mut nfa = self.clone();
        nfa.starts.clear();
        for state in starts {
            nfa.add_start(state);
        }
        nfa
    }

    /// Fresh automaton with the final set replaced.
    pub fn with_finals(&self, finals: BTreeSet<Value>) -> Nfa {
        let mut nfa = self.clone();
        nfa.finals.clear();
        for state in finals {
            nfa.add_final(state);
        }
        nfa
    }

    /// Fresh automaton with the given states added to the start set.
    pub fn add_starts(&self, extra: &BTreeSet<Value>) -> Nfa {
        let mut nfa = self.clone();
        for state in extra {
            nfa.add_start(state.clone());
        }
        nfa
    }

    /// Fresh automaton with the given states added to the final set.
    pub fn add_finals(&self, extra: &BTreeSet<Value>) -> Nfa {
        let mut nfa = self.clone();
        for state in extra {
            nfa.add_final(state.clone());
        }
        nfa
    }

    /// Largest integer state, or -1 for an automaton with no states.
    ///
    /// Errors when any state is not an integer; union and concatenation
    /// renumber states and need them numeric.
    pub(crate) fn max_int_state(&self) -> Result<i64, ExecutionError> {
        let mut max = -1;
        for state in &self.states {
            match state {
                Value::Int(value) => max = max.max(*value),
                _ => return Err(ExecutionError::NonIntStates),
            }
        }
        Ok(max)
    }
}
