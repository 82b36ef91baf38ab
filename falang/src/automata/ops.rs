//! The regular operations on ε-NFAs.
//!
//! Union and concatenation renumber the right operand's states past the left
//! operand's maximum and therefore need integer states. Intersection and
//! reachability go through per-label boolean adjacency matrices.

use std::collections::{BTreeMap, BTreeSet};

use super::matrix::BoolMatrix;
use super::Nfa;
use crate::error::ExecutionError;
use crate::value::Value;

/// Per-label adjacency matrices for one automaton. The ε-moves get their own
/// entry under `None`.
struct Adjacency {
    states: Vec<Value>,
    by_label: BTreeMap<Option<String>, BoolMatrix>,
}

impl Adjacency {
    fn build(nfa: &Nfa) -> Self {
        let states: Vec<Value> = nfa.states().iter().cloned().collect();
        let index: BTreeMap<&Value, usize> =
            states.iter().enumerate().map(|(i, s)| (s, i)).collect();
        let n = states.len();

        let mut by_label: BTreeMap<Option<String>, BoolMatrix> = BTreeMap::new();
        for t in nfa.transitions() {
            let matrix = by_label
                .entry(t.label.clone())
                .or_insert_with(|| BoolMatrix::new(n));
            matrix.set(index[&t.from], index[&t.to]);
        }
        Self { states, by_label }
    }
}

fn shift(state: &Value, offset: i64) -> Result<Value, ExecutionError> {
    match state {
        Value::Int(value) => Ok(Value::Int(value + offset)),
        _ => Err(ExecutionError::NonIntStates),
    }
}

/// Language union: disjoint union of the two automata with `b`'s states
/// renumbered past `a`'s maximum; starts and finals are unioned.
pub fn union(a: &Nfa, b: &Nfa) -> Result<Nfa, ExecutionError> {
    let offset = a.max_int_state()? + 1;
    let mut out = a.clone();
    for state in b.states() {
        out.add_state(shift(state, offset)?);
    }
    for t in b.transitions() {
        out.add_transition(shift(&t.from, offset)?, t.label.clone(), shift(&t.to, offset)?);
    }
    for state in b.starts() {
        out.add_start(shift(state, offset)?);
    }
    for state in b.finals() {
        out.add_final(shift(state, offset)?);
    }
    Ok(out)
}

/// Language concatenation: starts come from `a`, finals from the renumbered
/// `b`, and every final of `a` gets an ε-move to every renumbered start of
/// `b`.
pub fn concat(a: &Nfa, b: &Nfa) -> Result<Nfa, ExecutionError> {
    let offset = a.max_int_state()? + 1;
    let mut out = Nfa::new();
    for state in a.states() {
        out.add_state(state.clone());
    }
    for t in a.transitions() {
        out.add_transition(t.from.clone(), t.label.clone(), t.to.clone());
    }
    for state in b.states() {
        out.add_state(shift(state, offset)?);
    }
    for t in b.transitions() {
        out.add_transition(shift(&t.from, offset)?, t.label.clone(), shift(&t.to, offset)?);
    }
    for state in a.starts() {
        out.add_start(state.clone());
    }
    for state in b.finals() {
        out.add_final(shift(state, offset)?);
    }
    for final_state in a.finals() {
        for start in b.starts() {
            out.add_transition(final_state.clone(), None, shift(start, offset)?);
        }
    }
    Ok(out)
}

/// Kleene closure: an ε-move from every final to every start. Acceptance of
/// the empty word is the caller's business (typically `starts ⊆ finals`).
pub fn closure(a: &Nfa) -> Nfa {
    let mut out = a.clone();
    for final_state in a.finals() {
        for start in a.starts() {
            out.add_transition(final_state.clone(), None, start.clone());
        }
    }
    out
}

/// Intersection via the tensor product. Result states are `[sA, sB]` pairs;
/// a transition exists on label σ exactly when both operands step on σ.
/// ε-moves do not participate.
pub fn product(a: &Nfa, b: &Nfa) -> Nfa {
    let adj_a = Adjacency::build(a);
    let adj_b = Adjacency::build(b);
    let nb = adj_b.states.len();

    let mut out = Nfa::new();
    for (label, matrix_a) in &adj_a.by_label {
        let Some(symbol) = label else {
            continue;
        };
        let Some(matrix_b) = adj_b.by_label.get(label) else {
            continue;
        };
        let kron = matrix_a.kronecker(matrix_b);
        for (row, col) in kron.ones() {
            let from = Value::pair(adj_a.states[row / nb].clone(), adj_b.states[row % nb].clone());
            let to = Value::pair(adj_a.states[col / nb].clone(), adj_b.states[col % nb].clone());
            out.add_transition(from, Some(symbol.clone()), to);
        }
    }
    for sa in a.starts() {
        for sb in b.starts() {
            out.add_start(Value::pair(sa.clone(), sb.clone()));
        }
    }
    for fa in a.finals() {
        for fb in b.finals() {
            out.add_final(Value::pair(fa.clone(), fb.clone()));
        }
    }
    out
}

/// Start-to-final reachability over the label-erased transition relation
/// (ε-moves included). Pairs require a non-empty path.
pub fn reachable(nfa: &Nfa) -> BTreeSet<(Value, Value)> {
    let adj = Adjacency::build(nfa);
    let mut flat = BoolMatrix::new(adj.states.len());
    for matrix in adj.by_label.values() {
        flat.or_assign(matrix);
    }
    flat.transitive_closure();

    let mut pairs = BTreeSet::new();
    for (row, col) in flat.ones() {
        let from = &adj.states[row];
        let to = &adj.states[col];
        if nfa.starts().contains(from) && nfa.finals().contains(to) {
            pairs.insert((from.clone(), to.clone()));
        }
    }
    pairs
}
