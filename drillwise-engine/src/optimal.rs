//! Reference "best" path computation, independent of any session.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::graph::{Choice, NodeId, ScenarioGraph};

/// One step of the reference path: a node, and the text of the choice taken
/// from it, or `None` on the final (terminal or cycle-guarded) step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalPathStep {
    pub node_id: NodeId,
    pub choice_text: Option<String>,
}

/// Walk the graph greedily, always taking the choice with the greatest
/// `xp_delta` (ties to the first occurrence), and return the steps taken.
///
/// Local-greedy by design: each step maximizes the immediate delta without
/// looking downstream, so on graphs where an early sacrifice unlocks a
/// larger payoff this is not the global maximum-score path. The source
/// system behaves the same way and the result is what learners are shown,
/// so the heuristic is kept as-is rather than corrected.
///
/// Terminates for any graph: a visited-set guard stops the walk the moment
/// a node repeats. Deterministic for a fixed graph.
#[must_use]
pub fn find_best_path(graph: &ScenarioGraph) -> Vec<OptimalPathStep> {
    let mut steps = Vec::new();
    let mut visited: HashSet<&NodeId> = HashSet::new();
    let mut current = &graph.entry_id;

    loop {
        let Some(node) = graph.node(current) else {
            // Unvalidated graph; close the path where it broke.
            steps.push(OptimalPathStep {
                node_id: current.clone(),
                choice_text: None,
            });
            break;
        };

        if node.is_terminal || !visited.insert(current) {
            steps.push(OptimalPathStep {
                node_id: current.clone(),
                choice_text: None,
            });
            break;
        }
        let Some((_, best)) = best_choice(&node.choices) else {
            steps.push(OptimalPathStep {
                node_id: current.clone(),
                choice_text: None,
            });
            break;
        };

        steps.push(OptimalPathStep {
            node_id: current.clone(),
            choice_text: Some(best.text.clone()),
        });
        current = &best.next_node_id;
    }

    steps
}

/// The choice indices that drive a session along [`find_best_path`]'s walk.
///
/// Indices come from the same argmax rule as the path itself. Choice text is
/// opaque author content and may legally repeat within a node, so matching
/// the recorded text back to an index would resolve duplicates to the wrong
/// choice; this never consults the text.
#[must_use]
pub fn greedy_script(graph: &ScenarioGraph) -> Vec<usize> {
    let mut script = Vec::new();
    let mut visited: HashSet<&NodeId> = HashSet::new();
    let mut current = &graph.entry_id;

    while let Some(node) = graph.node(current) {
        if node.is_terminal || !visited.insert(current) {
            break;
        }
        let Some((index, best)) = best_choice(&node.choices) else {
            break;
        };
        script.push(index);
        current = &best.next_node_id;
    }

    script
}

/// Greatest `xp_delta`, ties to the first occurrence. `None` on an empty
/// choice list.
fn best_choice(choices: &[Choice]) -> Option<(usize, &Choice)> {
    let mut iter = choices.iter().enumerate();
    let mut best = iter.next()?;
    for candidate in iter {
        if candidate.1.xp_delta > best.1.xp_delta {
            best = candidate;
        }
    }
    Some(best)
}
