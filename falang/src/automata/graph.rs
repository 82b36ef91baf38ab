//! DOT-style digraph reader backing the `load` expression.
//!
//! Understands the subset of DOT that labeled-graph datasets actually use:
//! one edge or node statement per line, with an optional attribute list.
//! Node identifiers must convert to 64-bit integers; every node is both an
//! initial and a final state.

use std::fs;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Nfa;
use crate::error::ExecutionError;
use crate::value::Value;

static EDGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"?([\w.]+)"?\s*->\s*"?([\w.]+)"?\s*(\[[^\]]*\])?\s*;?$"#).unwrap()
});

static NODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"?([\w.]+)"?\s*(\[[^\]]*\])?\s*;?$"#).unwrap());

static LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"label\s*=\s*(?:"([^"]*)"|([\w.]+))"#).unwrap());

/// Read a labeled digraph from `path` and treat every node as both start
/// and final.
pub fn load_graph(path: &str) -> Result<Nfa, ExecutionError> {
    let text = fs::read_to_string(path).map_err(|e| ExecutionError::LoadFailed {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    parse_dot(&text)
}

fn parse_dot(text: &str) -> Result<Nfa, ExecutionError> {
    let mut nfa = Nfa::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
            continue;
        }
        if line.starts_with("digraph") || line.starts_with("graph") || line == "{" || line == "}" {
            continue;
        }

        if let Some(caps) = EDGE_RE.captures(line) {
            let from = vertex(&caps[1])?;
            let to = vertex(&caps[2])?;
            match caps.get(3).and_then(|attrs| edge_label(attrs.as_str())) {
                Some(label) => nfa.add_transition(from, Some(label), to),
                // unlabeled edges contribute their endpoints only
                None => {
                    nfa.add_state(from);
                    nfa.add_state(to);
                }
            }
        } else if let Some(caps) = NODE_RE.captures(line) {
            nfa.add_state(vertex(&caps[1])?);
        }
        // anything else is DOT decoration this reader does not care about
    }

    let states: Vec<Value> = nfa.states().iter().cloned().collect();
    for state in states {
        nfa.add_start(state.clone());
        nfa.add_final(state);
    }
    Ok(nfa)
}

fn vertex(text: &str) -> Result<Value, ExecutionError> {
    text.parse::<i64>()
        .map(Value::Int)
        .map_err(|_| ExecutionError::NonIntVertices)
}

fn edge_label(attrs: &str) -> Option<String> {
    let caps = LABEL_RE.captures(attrs)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}
