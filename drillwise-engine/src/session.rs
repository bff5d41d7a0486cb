//! Interactive traversal of a validated scenario graph.
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;
use thiserror::Error;

use crate::graph::{NodeId, ScenarioGraph, ScenarioNode};

/// Visited node ids, stored inline for typical drill lengths.
pub type VisitedPath = SmallVec<[NodeId; 8]>;

/// Lifecycle state of a session. `Finished` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Finished,
}

/// Errors raised by [`Session::apply_choice`] and [`crate::score::finalize`]
/// on caller misuse.
///
/// These indicate a bug in the calling presentation layer (a stale UI
/// offering a choice after the session ended, or scoring an unfinished run);
/// they are deterministic and never retryable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("session already finished at node '{node}'")]
    SessionTerminated { node: NodeId },
    #[error("choice index {index} is out of bounds for node '{node}' ({available} choices)")]
    InvalidChoiceIndex {
        node: NodeId,
        index: usize,
        available: usize,
    },
    #[error("session is still in progress at node '{node}'")]
    SessionInProgress { node: NodeId },
}

/// Immediate result of applying one choice.
///
/// Carries the feedback and score delta for display, plus the updated session
/// snapshot. The prior session value is left untouched, which keeps replay
/// and undo trivial.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOutcome {
    pub feedback: String,
    pub xp_delta: i32,
    pub next_node_id: NodeId,
    pub session: Session,
}

/// One learner attempt walking a scenario graph.
///
/// The graph is shared read-only; a session never mutates it. Each
/// [`Session::apply_choice`] call returns a fresh snapshot rather than
/// mutating in place, so a session value is immutable once created.
///
/// Serialization skips the graph; a deserialized session must be re-attached
/// with [`Session::rehydrate`] before further use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(skip)]
    graph: Arc<ScenarioGraph>,
    current_node_id: NodeId,
    accumulated_score: i32,
    path: VisitedPath,
    status: SessionStatus,
}

impl Session {
    /// Begin a fresh session at the graph's entry node.
    ///
    /// Precondition: the graph has passed [`crate::validate::validate`].
    /// The engine does not re-validate per session; debug builds assert.
    #[must_use]
    pub fn start(graph: Arc<ScenarioGraph>) -> Self {
        debug_assert!(
            crate::validate::validate(&graph).is_ok(),
            "session started on an unvalidated graph"
        );
        let entry = graph.entry_id.clone();
        log::debug!("session start at '{entry}'");
        Self {
            graph,
            current_node_id: entry.clone(),
            accumulated_score: 0,
            path: smallvec![entry],
            status: SessionStatus::InProgress,
        }
    }

    /// Apply the choice at `choice_index` on the current node.
    ///
    /// On success the returned [`ChoiceOutcome`] holds the choice's feedback
    /// and score delta plus the advanced session; landing on a terminal node
    /// finishes that session.
    ///
    /// # Errors
    ///
    /// - [`EngineError::SessionTerminated`] when the session is finished.
    /// - [`EngineError::InvalidChoiceIndex`] when the current node has no
    ///   choice at `choice_index`.
    pub fn apply_choice(&self, choice_index: usize) -> Result<ChoiceOutcome, EngineError> {
        if self.status == SessionStatus::Finished {
            return Err(EngineError::SessionTerminated {
                node: self.current_node_id.clone(),
            });
        }

        let available = self
            .current_node()
            .map_or(0, |node| node.choices.len());
        let Some(choice) = self.current_node().and_then(|node| node.choice(choice_index)) else {
            return Err(EngineError::InvalidChoiceIndex {
                node: self.current_node_id.clone(),
                index: choice_index,
                available,
            });
        };

        let next_id = choice.next_node_id.clone();
        let landed_terminal = self.graph.node(&next_id).is_some_and(|node| node.is_terminal);

        let mut next = self.clone();
        next.accumulated_score += choice.xp_delta;
        next.path.push(next_id.clone());
        next.current_node_id = next_id.clone();
        if landed_terminal {
            next.status = SessionStatus::Finished;
        }

        log::debug!(
            "choice {} at '{}' -> '{}' (xp {:+}, total {})",
            choice_index,
            self.current_node_id,
            next_id,
            choice.xp_delta,
            next.accumulated_score
        );

        Ok(ChoiceOutcome {
            feedback: choice.feedback.clone(),
            xp_delta: choice.xp_delta,
            next_node_id: next_id,
            session: next,
        })
    }

    /// Replay a scripted sequence of choice indices from a fresh session.
    ///
    /// Deterministic: the same script against the same graph always yields
    /// the same final session.
    ///
    /// # Errors
    ///
    /// Propagates the first [`EngineError`] hit by the script, including
    /// submitting past a terminal node.
    pub fn replay(graph: Arc<ScenarioGraph>, script: &[usize]) -> Result<Self, EngineError> {
        let mut session = Self::start(graph);
        for &index in script {
            session = session.apply_choice(index)?.session;
        }
        Ok(session)
    }

    /// Re-attach a graph after deserialization.
    #[must_use]
    pub fn rehydrate(mut self, graph: Arc<ScenarioGraph>) -> Self {
        self.graph = graph;
        self
    }

    /// Borrow the shared graph.
    #[must_use]
    pub fn graph(&self) -> &ScenarioGraph {
        &self.graph
    }

    /// Borrow the node the session currently sits on.
    #[must_use]
    pub fn current_node(&self) -> Option<&ScenarioNode> {
        self.graph.node(&self.current_node_id)
    }

    /// Id of the node the session currently sits on.
    #[must_use]
    pub const fn current_node_id(&self) -> &NodeId {
        &self.current_node_id
    }

    /// Exact sum of the xp deltas of every choice applied so far.
    #[must_use]
    pub const fn accumulated_score(&self) -> i32 {
        self.accumulated_score
    }

    /// Ordered node ids visited, starting with the entry node.
    #[must_use]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// True once a terminal node has been entered.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }
}
