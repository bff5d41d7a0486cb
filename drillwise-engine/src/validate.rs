//! Structural validation run once before a graph is used.
use thiserror::Error;

use crate::graph::{NodeId, ScenarioGraph};

/// Errors raised when scenario graph invariants are violated.
///
/// A graph that fails validation must never be played; every other component
/// in this crate treats an unvalidated graph as untrusted input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("entry node '{entry}' is not present in the graph")]
    UnknownEntry { entry: NodeId },
    #[error("choice '{choice}' on node '{node}' points at missing node '{target}'")]
    DanglingReference {
        node: NodeId,
        choice: String,
        target: NodeId,
    },
    #[error("node '{node}' is malformed: {reason}")]
    MalformedNode { node: NodeId, reason: &'static str },
}

/// Check every structural invariant of a scenario graph.
///
/// Pure check with no side effects. Returns the first violation found, in
/// deterministic node-id order.
///
/// # Errors
///
/// - [`GraphError::UnknownEntry`] when `entry_id` resolves to no node.
/// - [`GraphError::MalformedNode`] when a terminal node carries choices or
///   lacks an outcome, or a non-terminal node has no choices.
/// - [`GraphError::DanglingReference`] when any choice targets a missing
///   node.
pub fn validate(graph: &ScenarioGraph) -> Result<(), GraphError> {
    if !graph.nodes.contains_key(&graph.entry_id) {
        return Err(GraphError::UnknownEntry {
            entry: graph.entry_id.clone(),
        });
    }

    for (id, node) in &graph.nodes {
        if node.is_terminal {
            if !node.choices.is_empty() {
                return Err(GraphError::MalformedNode {
                    node: id.clone(),
                    reason: "terminal node must have no choices",
                });
            }
            if node.outcome.is_none() {
                return Err(GraphError::MalformedNode {
                    node: id.clone(),
                    reason: "terminal node must declare an outcome",
                });
            }
        } else if node.choices.is_empty() {
            return Err(GraphError::MalformedNode {
                node: id.clone(),
                reason: "non-terminal node must have at least one choice",
            });
        }

        for choice in &node.choices {
            if !graph.nodes.contains_key(&choice.next_node_id) {
                return Err(GraphError::DanglingReference {
                    node: id.clone(),
                    choice: choice.text.clone(),
                    target: choice.next_node_id.clone(),
                });
            }
        }
    }

    Ok(())
}
