//! Domain types for the badge streak engine.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - Day, asset and block identity primitives
//! - Badge, EngineState and ClaimPeriod records
//! - Trigger events and upstream price observations

pub mod badge;
pub mod claim_period;
pub mod decimal;
pub mod observation;
pub mod primitives;
pub mod state;

pub use badge::Badge;
pub use claim_period::ClaimPeriod;
pub use decimal::Decimal;
pub use observation::{PriceObservation, TriggerEvent};
pub use primitives::{AssetId, BlockIdentity, DayIndex, SECONDS_PER_DAY};
pub use state::EngineState;
