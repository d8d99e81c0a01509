//! Pure streak state machine.
//!
//! Nothing here touches storage: callers load the engine state, badge and
//! price observations, run the gate and evaluator, then persist the result.

use crate::domain::{ClaimPeriod, Decimal};

pub mod claim;
pub mod day_gate;
pub mod streak;

pub use claim::build_claim_period;
pub use day_gate::DayGate;
pub use streak::{evaluate, price_change, threshold_satisfied};

/// Result of evaluating one day against a badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreakOutcome {
    /// A price observation was missing or unusable; nothing changed.
    Inconclusive,
    /// The day qualified; `streak` is the new count.
    Incremented { change: Decimal, streak: i64 },
    /// The day failed before the streak reached the minimum length.
    Reset { change: Decimal, ended_streak: i64 },
    /// The day failed after a qualifying streak; the streak was reset.
    ResetAndClaimed {
        change: Decimal,
        claim_period: ClaimPeriod,
    },
}

impl StreakOutcome {
    pub fn claim_period(&self) -> Option<&ClaimPeriod> {
        match self {
            StreakOutcome::ResetAndClaimed { claim_period, .. } => Some(claim_period),
            _ => None,
        }
    }
}
