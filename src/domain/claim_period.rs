//! Completed qualifying streaks.

use crate::domain::{BlockIdentity, DayIndex};
use serde::{Deserialize, Serialize};

/// Immutable record of a streak that reached the badge's minimum length.
///
/// Invariant: `start_day == end_day - streak_length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPeriod {
    /// Derived from the block that broke the streak, so replays collide on the same key.
    pub id: String,
    pub badge_id: String,
    pub start_day: DayIndex,
    /// Day the streak broke.
    pub end_day: DayIndex,
    pub streak_length: i64,
}

impl ClaimPeriod {
    /// Build a claim period ending on `end_day` for a streak of `streak_length` days.
    pub fn new(
        block: &BlockIdentity,
        badge_id: impl Into<String>,
        end_day: DayIndex,
        streak_length: i64,
    ) -> Self {
        Self {
            id: Self::derive_id(block),
            badge_id: badge_id.into(),
            start_day: end_day.previous(streak_length),
            end_day,
            streak_length,
        }
    }

    /// Stable key for the claim period caused by `block`.
    pub fn derive_id(block: &BlockIdentity) -> String {
        block.as_str().to_string()
    }
}
