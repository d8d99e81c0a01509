use crate::domain::{Badge, Decimal, PriceObservation, TriggerEvent};

use super::claim::build_claim_period;
use super::StreakOutcome;

/// Relative change from the older price to the newer one, as a fraction.
///
/// `(yesterday - day_before) / day_before`, so a drop from 100 to 94 is -0.06.
/// Returns `None` when `day_before` is zero and no change can be measured.
pub fn price_change(day_before: Decimal, yesterday: Decimal) -> Option<Decimal> {
    (yesterday - day_before).checked_div(day_before)
}

/// Sign-dependent threshold test.
///
/// A positive threshold asks for a rise strictly above it; zero or a
/// negative threshold asks for a change strictly below it.
pub fn threshold_satisfied(change: Decimal, threshold: Decimal) -> bool {
    if threshold.is_positive() {
        change > threshold
    } else {
        change < threshold
    }
}

/// Apply one day's price move to `badge`.
///
/// `yesterday` and `day_before` are the observations for the two days
/// preceding the event's day. Without both the day is inconclusive and the
/// badge is left untouched.
pub fn evaluate(
    event: &TriggerEvent,
    badge: &mut Badge,
    yesterday: Option<&PriceObservation>,
    day_before: Option<&PriceObservation>,
) -> StreakOutcome {
    let (Some(yesterday), Some(day_before)) = (yesterday, day_before) else {
        return StreakOutcome::Inconclusive;
    };
    let Some(change) = price_change(day_before.price_usd, yesterday.price_usd) else {
        return StreakOutcome::Inconclusive;
    };

    if threshold_satisfied(change, badge.delta_threshold) {
        badge.current_streak += 1;
        return StreakOutcome::Incremented {
            change,
            streak: badge.current_streak,
        };
    }

    let ended_streak = badge.current_streak;
    let outcome = if badge.streak_qualifies() {
        StreakOutcome::ResetAndClaimed {
            change,
            claim_period: build_claim_period(event, badge),
        }
    } else {
        StreakOutcome::Reset {
            change,
            ended_streak,
        }
    };
    badge.current_streak = 0;
    outcome
}
