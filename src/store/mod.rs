//! Persistence seam for the streak engine.
//!
//! The engine itself is pure; a `StreakStore` supplies the records around
//! each invocation and writes the result back in one atomic step.

use crate::domain::{AssetId, Badge, ClaimPeriod, DayIndex, EngineState, PriceObservation};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// Everything one processed day writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyUpdate {
    pub engine_state: EngineState,
    pub badge: Badge,
    /// Inserted only if no claim period with the same id exists yet.
    pub claim_period: Option<ClaimPeriod>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Keyed access to the engine's records.
///
/// Implementations must apply `commit` all-or-nothing.
#[async_trait]
pub trait StreakStore: Send + Sync + std::fmt::Debug {
    /// Stored engine state, or the never-processed default.
    async fn load_engine_state(&self) -> Result<EngineState, StoreError>;

    /// Stored badge with `defaults.id`, or `defaults` if it was never saved.
    async fn load_badge(&self, defaults: &Badge) -> Result<Badge, StoreError>;

    async fn get_price_observation(
        &self,
        asset: &AssetId,
        day: DayIndex,
    ) -> Result<Option<PriceObservation>, StoreError>;

    /// Persist a processed day. Returns whether the claim period was newly inserted.
    async fn commit(&self, update: &DailyUpdate) -> Result<bool, StoreError>;
}
