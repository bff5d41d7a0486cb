//! Central tuning constants for scoring and badge assignment.

/// Minimum percentage required for a drill attempt to count as passed.
pub const PASS_THRESHOLD_PCT: i32 = 60;

/// Percentage cut-off for the top badge tier.
pub const BADGE_EXPERT_PCT: i32 = 95;

/// Percentage cut-off for the second badge tier.
pub const BADGE_PROFICIENT_PCT: i32 = 80;

/// Percentage cut-off for the third ("passed") badge tier; equals the pass
/// threshold by design.
pub const BADGE_QUALIFIED_PCT: i32 = PASS_THRESHOLD_PCT;
