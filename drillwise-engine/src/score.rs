//! Final scoring and badge assignment for finished sessions.
use serde::{Deserialize, Serialize};

use crate::constants::{BADGE_EXPERT_PCT, BADGE_PROFICIENT_PCT, BADGE_QUALIFIED_PCT,
    PASS_THRESHOLD_PCT};
use crate::graph::OutcomeKind;
use crate::session::{EngineError, Session};

/// Badge tier assigned from the final percentage, highest threshold first.
///
/// The engine only identifies the tier; display labels and icons are author
/// content carried on the graph (see [`crate::graph::ScenarioGraph::badge_label`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    /// 95% and up.
    Expert,
    /// 80% and up.
    Proficient,
    /// 60% and up; the passing tier.
    Qualified,
    /// Above zero but below passing.
    Trainee,
    /// Zero, including every failure ending.
    Remedial,
}

impl BadgeTier {
    /// Select the tier for a clamped percentage.
    #[must_use]
    pub const fn for_percentage(percentage: i32) -> Self {
        if percentage >= BADGE_EXPERT_PCT {
            Self::Expert
        } else if percentage >= BADGE_PROFICIENT_PCT {
            Self::Proficient
        } else if percentage >= BADGE_QUALIFIED_PCT {
            Self::Qualified
        } else if percentage > 0 {
            Self::Trainee
        } else {
            Self::Remedial
        }
    }

    /// Stable name of the tier, matching its serialized form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Expert => "expert",
            Self::Proficient => "proficient",
            Self::Qualified => "qualified",
            Self::Trainee => "trainee",
            Self::Remedial => "remedial",
        }
    }
}

impl std::fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Final scorecard for one drill attempt.
///
/// The `{percentage, passed}` pair is the sole contract consumed by external
/// progress tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillScore {
    /// Normalized score in `[0, 100]`.
    pub percentage: i32,
    /// Whether the attempt meets the fixed pass threshold.
    pub passed: bool,
    pub badge: BadgeTier,
}

/// Normalize an accumulated score against the author-declared maximum.
///
/// Clamped to `[0, 100]`; a non-positive declared maximum normalizes to zero
/// rather than dividing by it.
#[must_use]
pub fn normalize_percentage(accumulated: i32, max_possible: i32) -> i32 {
    if max_possible <= 0 {
        return 0;
    }
    let ratio = f64::from(accumulated) / f64::from(max_possible) * 100.0;
    let clamped = ratio.round().clamp(0.0, 100.0);
    // Safe after clamping to [0, 100].
    #[allow(clippy::cast_possible_truncation)]
    {
        clamped as i32
    }
}

/// Turn a finished session into its final scorecard.
///
/// A failure ending zeroes the percentage regardless of accumulated score;
/// one disqualifying mistake voids the attempt even when earlier choices
/// earned points. That rule is deliberate, not an accounting bug.
///
/// # Errors
///
/// [`EngineError::SessionInProgress`] when the session has not reached a
/// terminal node; scoring an unfinished run is a caller bug.
pub fn finalize(session: &Session) -> Result<DrillScore, EngineError> {
    if !session.is_finished() {
        return Err(EngineError::SessionInProgress {
            node: session.current_node_id().clone(),
        });
    }

    let outcome = session
        .current_node()
        .and_then(|node| node.outcome)
        .unwrap_or(OutcomeKind::Failure);
    debug_assert!(
        session.current_node().is_some_and(|node| node.outcome.is_some()),
        "finished session on a terminal node without an outcome"
    );

    let percentage = match outcome {
        OutcomeKind::Failure => 0,
        OutcomeKind::Success => normalize_percentage(
            session.accumulated_score(),
            session.graph().max_possible_score,
        ),
    };
    let badge = BadgeTier::for_percentage(percentage);
    let passed = percentage >= PASS_THRESHOLD_PCT;

    log::debug!(
        "finalize at '{}': {percentage}% passed={passed} badge={badge}",
        session.current_node_id()
    );

    Ok(DrillScore {
        percentage,
        passed,
        badge,
    })
}
