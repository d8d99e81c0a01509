use crate::domain::{AssetId, DayIndex, EngineState, TriggerEvent};

/// Admits at most one event per day for the tracked asset.
///
/// The gate never moves backwards: a day at or before `last_processed_day`
/// is a no-op, which makes replays and same-day repeats idempotent.
#[derive(Debug, Clone)]
pub struct DayGate {
    tracked_asset: AssetId,
}

impl DayGate {
    pub fn new(tracked_asset: AssetId) -> Self {
        Self { tracked_asset }
    }

    pub fn tracked_asset(&self) -> &AssetId {
        &self.tracked_asset
    }

    /// Day of `event` if it concerns the tracked asset, `None` otherwise.
    pub fn admit(&self, event: &TriggerEvent) -> Option<DayIndex> {
        if event.asset_id != self.tracked_asset {
            return None;
        }
        Some(event.day_index())
    }

    pub fn should_process(day: DayIndex, state: &EngineState) -> bool {
        day > state.last_processed_day
    }

    pub fn mark_processed(day: DayIndex, state: &mut EngineState) {
        if day > state.last_processed_day {
            state.last_processed_day = day;
        }
    }
}
