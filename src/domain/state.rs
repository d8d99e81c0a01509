//! Engine-wide bookkeeping shared by every badge evaluation.

use crate::domain::DayIndex;
use serde::{Deserialize, Serialize};

/// Last day the engine finished processing; `-1` until the first day is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    pub last_processed_day: DayIndex,
}

impl EngineState {
    pub fn new() -> Self {
        Self {
            last_processed_day: DayIndex(-1),
        }
    }

    pub fn with_last_processed_day(day: DayIndex) -> Self {
        Self {
            last_processed_day: day,
        }
    }

    /// True until any day has been processed.
    pub fn is_pristine(&self) -> bool {
        self.last_processed_day.as_i64() < 0
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}
