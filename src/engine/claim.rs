use crate::domain::{Badge, ClaimPeriod, TriggerEvent};

/// Claim period for the streak `badge` is about to end at `event`'s day.
///
/// Must be called before the streak is reset: the pre-reset count is the
/// streak length and the distance back to the start day.
pub fn build_claim_period(event: &TriggerEvent, badge: &Badge) -> ClaimPeriod {
    ClaimPeriod::new(
        &event.block_identity,
        badge.id.clone(),
        event.day_index(),
        badge.current_streak,
    )
}
