//! Daily processing pipeline: the host side of the streak engine.
//!
//! This module provides:
//! - The per-event entry point (`DailyProcessor::on_daily_observation`)
//! - Serialized, all-or-nothing application of each processed day

use crate::domain::{ClaimPeriod, DayIndex, Decimal};
use crate::store::StoreError;
use serde::Serialize;
use thiserror::Error;

pub mod daily;

pub use daily::DailyProcessor;

/// What one trigger event did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DailyOutcome {
    /// The event was for an asset other than the tracked one.
    IgnoredAsset,
    /// The event's day was already processed.
    #[serde(rename_all = "camelCase")]
    AlreadyProcessed {
        day: DayIndex,
        last_processed_day: DayIndex,
    },
    /// The day lies outside the badge's active window; the day still counts as processed.
    Inactive { day: DayIndex },
    /// A price observation was missing; the day still counts as processed.
    Inconclusive { day: DayIndex },
    #[serde(rename_all = "camelCase")]
    Incremented {
        day: DayIndex,
        price_change: Decimal,
        current_streak: i64,
    },
    #[serde(rename_all = "camelCase")]
    Reset {
        day: DayIndex,
        price_change: Decimal,
        ended_streak: i64,
    },
    /// A qualifying streak ended. `inserted` is false when the claim period already existed.
    #[serde(rename_all = "camelCase")]
    Claimed {
        day: DayIndex,
        price_change: Decimal,
        claim_period: ClaimPeriod,
        inserted: bool,
    },
}

impl DailyOutcome {
    /// Whether the event advanced the day gate.
    pub fn processed_day(&self) -> Option<DayIndex> {
        match self {
            DailyOutcome::IgnoredAsset | DailyOutcome::AlreadyProcessed { .. } => None,
            DailyOutcome::Inactive { day }
            | DailyOutcome::Inconclusive { day }
            | DailyOutcome::Incremented { day, .. }
            | DailyOutcome::Reset { day, .. }
            | DailyOutcome::Claimed { day, .. } => Some(*day),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
