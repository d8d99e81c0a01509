//! Badge definition and its mutable streak counter.

use crate::domain::{DayIndex, Decimal};
use serde::{Deserialize, Serialize};

/// Day on which the default badge starts being evaluated (timestamp 1588530377).
pub const WINTER_ACTIVE_FROM: DayIndex = DayIndex(18_385);

/// Badge configuration plus the running streak.
///
/// `current_streak` is the number of consecutive qualifying days since the
/// last reset and never goes below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    /// Signed fraction: positive thresholds reward rises, zero or negative reward drops.
    pub delta_threshold: Decimal,
    pub minimum_streak_length: i64,
    pub current_streak: i64,
    pub active_from: DayIndex,
    /// `None` means the badge never stops being evaluated.
    pub active_until: Option<DayIndex>,
}

impl Badge {
    /// The "Winter" badge: ETH falling more than 5% a day for at least 3 days.
    pub fn winter() -> Self {
        Self {
            id: "1".to_string(),
            name: "Winter".to_string(),
            delta_threshold: -Decimal::new(rust_decimal::Decimal::new(5, 2)),
            minimum_streak_length: 3,
            current_streak: 0,
            active_from: WINTER_ACTIVE_FROM,
            active_until: None,
        }
    }

    /// Whether the badge is evaluated on `day`.
    pub fn is_active_on(&self, day: DayIndex) -> bool {
        day >= self.active_from && self.active_until.map_or(true, |until| day <= until)
    }

    /// Whether the running streak is long enough to earn a claim period.
    pub fn streak_qualifies(&self) -> bool {
        self.current_streak >= self.minimum_streak_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winter_defaults() {
        let badge = Badge::winter();
        assert_eq!(badge.id, "1");
        assert_eq!(badge.name, "Winter");
        assert_eq!(badge.delta_threshold.to_canonical_string(), "-0.05");
        assert_eq!(badge.minimum_streak_length, 3);
        assert_eq!(badge.current_streak, 0);
        assert_eq!(badge.active_from, DayIndex(18_385));
        assert_eq!(badge.active_until, None);
    }

    #[test]
    fn test_active_window_bounds_are_inclusive() {
        let mut badge = Badge::winter();
        badge.active_from = DayIndex(10);
        badge.active_until = Some(DayIndex(20));

        assert!(!badge.is_active_on(DayIndex(9)));
        assert!(badge.is_active_on(DayIndex(10)));
        assert!(badge.is_active_on(DayIndex(20)));
        assert!(!badge.is_active_on(DayIndex(21)));
    }

    #[test]
    fn test_unbounded_window() {
        let badge = Badge::winter();
        assert!(badge.is_active_on(DayIndex(1_000_000)));
        assert!(!badge.is_active_on(DayIndex(0)));
    }

    #[test]
    fn test_streak_qualifies() {
        let mut badge = Badge::winter();
        badge.current_streak = 2;
        assert!(!badge.streak_qualifies());
        badge.current_streak = 3;
        assert!(badge.streak_qualifies());
    }
}
