//! Alignment of a recorded user path against the reference best path.
use serde::{Deserialize, Serialize};

use crate::graph::{NodeId, ScenarioGraph};
use crate::optimal::{OptimalPathStep, find_best_path};

/// Classification of one best-path step against the user's recorded path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The user visited this node and continued to the optimal next node.
    Followed,
    /// The user visited this node but continued elsewhere.
    Deviated,
    /// The user never visited this node.
    Missed,
}

/// Classify every best-path step as followed, deviated, or missed.
///
/// Pure function over both inputs; returns exactly one status per element of
/// `best_path`, whatever the user path contains. A node is matched at its
/// first occurrence in the user path.
#[must_use]
pub fn diff(best_path: &[OptimalPathStep], user_path: &[NodeId]) -> Vec<StepStatus> {
    best_path
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let Some(position) = user_path.iter().position(|id| id == &step.node_id) else {
                return StepStatus::Missed;
            };
            let Some(next_step) = best_path.get(index + 1) else {
                // Final step: visiting it at all counts as followed.
                return StepStatus::Followed;
            };
            match user_path.get(position + 1) {
                Some(user_next) if user_next == &next_step.node_id => StepStatus::Followed,
                _ => StepStatus::Deviated,
            }
        })
        .collect()
}

/// The "path to a perfect score" report handed to presentation layers:
/// the reference path plus one status per step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReport {
    pub best_path: Vec<OptimalPathStep>,
    pub statuses: Vec<StepStatus>,
}

impl PathReport {
    /// Iterate steps paired with their status.
    pub fn steps(&self) -> impl Iterator<Item = (&OptimalPathStep, StepStatus)> {
        self.best_path.iter().zip(self.statuses.iter().copied())
    }
}

/// Compute the best path for `graph` and align `user_path` against it.
#[must_use]
pub fn perfect_path_report(graph: &ScenarioGraph, user_path: &[NodeId]) -> PathReport {
    let best_path = find_best_path(graph);
    let statuses = diff(&best_path, user_path);
    PathReport {
        best_path,
        statuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testutil::two_step_graph;

    fn ids(raw: &[&str]) -> Vec<NodeId> {
        raw.iter().map(|id| NodeId::new(id)).collect()
    }

    #[test]
    fn perfect_run_is_followed_throughout() {
        let graph = two_step_graph();
        let report = perfect_path_report(&graph, &ids(&["start", "n1", "end_ok"]));
        assert_eq!(
            report.statuses,
            vec![StepStatus::Followed, StepStatus::Followed, StepStatus::Followed]
        );
    }

    #[test]
    fn wrong_turn_marks_deviation_then_missed() {
        let graph = two_step_graph();
        // User raised the alarm but then took the elevator.
        let report = perfect_path_report(&graph, &ids(&["start", "n1", "end_fail2"]));
        assert_eq!(
            report.statuses,
            vec![StepStatus::Followed, StepStatus::Deviated, StepStatus::Missed]
        );
    }

    #[test]
    fn immediate_failure_misses_the_rest() {
        let graph = two_step_graph();
        let report = perfect_path_report(&graph, &ids(&["start", "end_fail"]));
        assert_eq!(
            report.statuses,
            vec![StepStatus::Deviated, StepStatus::Missed, StepStatus::Missed]
        );
    }

    #[test]
    fn one_status_per_step_even_for_empty_user_path() {
        let graph = two_step_graph();
        let best = find_best_path(&graph);
        let statuses = diff(&best, &[]);
        assert_eq!(statuses.len(), best.len());
        assert!(statuses.iter().all(|status| *status == StepStatus::Missed));
    }

    #[test]
    fn unrelated_user_nodes_do_not_panic_or_match() {
        let graph = two_step_graph();
        let best = find_best_path(&graph);
        let statuses = diff(&best, &ids(&["elsewhere", "nowhere"]));
        assert_eq!(statuses.len(), best.len());
        assert!(statuses.iter().all(|status| *status == StepStatus::Missed));
    }

    #[test]
    fn user_path_ending_on_a_best_node_without_successor_deviates() {
        let graph = two_step_graph();
        let best = find_best_path(&graph);
        // User stopped right after n1; no next node recorded.
        let statuses = diff(&best, &ids(&["start", "n1"]));
        assert_eq!(
            statuses,
            vec![StepStatus::Followed, StepStatus::Deviated, StepStatus::Missed]
        );
    }

    #[test]
    fn inputs_are_not_mutated() {
        let graph = two_step_graph();
        let best = find_best_path(&graph);
        let user = ids(&["start", "n1", "end_ok"]);
        let before = (best.clone(), user.clone());
        let _ = diff(&best, &user);
        assert_eq!(before, (best, user));
    }
}
