//! Drillwise Engine
//!
//! Platform-agnostic core logic for branching-scenario drills. One generic,
//! data-driven engine replaces per-drill reimplementations: content lives in
//! declarative [`ScenarioGraph`] data, and this crate supplies validation,
//! interactive traversal, scoring, and best-path reporting on top of it.
//! No UI, persistence, or platform-specific dependencies.

pub mod compare;
pub mod constants;
pub mod graph;
pub mod optimal;
pub mod score;
pub mod session;
pub mod validate;

use std::sync::Arc;

// Re-export commonly used types
pub use compare::{PathReport, StepStatus, diff, perfect_path_report};
pub use graph::{BadgeLabel, Choice, NodeId, OutcomeKind, ScenarioGraph, ScenarioNode};
pub use optimal::{OptimalPathStep, find_best_path, greedy_script};
pub use score::{BadgeTier, DrillScore, finalize, normalize_percentage};
pub use session::{ChoiceOutcome, EngineError, Session, SessionStatus, VisitedPath};
pub use validate::{GraphError, validate};

/// Trait for abstracting scenario loading operations.
/// Platform-specific implementations should provide this.
pub trait ScenarioSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load a scenario graph by name from the platform-specific source.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario cannot be loaded or parsed.
    fn load_scenario(&self, name: &str) -> Result<ScenarioGraph, Self::Error>;
}

/// Facade binding a scenario source to the engine: loads a graph, validates
/// it exactly once, and hands out sessions and reports against the shared
/// read-only copy.
pub struct DrillEngine<S>
where
    S: ScenarioSource,
{
    source: S,
}

impl<S> DrillEngine<S>
where
    S: ScenarioSource,
{
    /// Create an engine over the provided scenario source.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Load and validate a scenario, returning it ready for sharing.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to load the scenario or the
    /// graph violates a structural invariant.
    pub fn load(&self, name: &str) -> anyhow::Result<Arc<ScenarioGraph>> {
        let graph = self.source.load_scenario(name)?;
        validate(&graph)?;
        Ok(Arc::new(graph))
    }

    /// Load, validate, and start a fresh session in one call.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`DrillEngine::load`].
    pub fn begin(&self, name: &str) -> anyhow::Result<Session> {
        Ok(Session::start(self.load(name)?))
    }

    /// Finish a session and bundle its scorecard with the perfect-path
    /// report, the full completion payload for a presentation layer.
    ///
    /// # Errors
    ///
    /// [`EngineError::SessionInProgress`] when the session is not finished.
    pub fn debrief(&self, session: &Session) -> Result<(DrillScore, PathReport), EngineError> {
        let drill_score = finalize(session)?;
        let report = perfect_path_report(session.graph(), session.path());
        Ok((drill_score, report))
    }
}
