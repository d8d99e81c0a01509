//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by record:
//! - `streaks.rs` - Badge, engine state and the atomic daily commit
//! - `prices.rs` - Upstream price observations
//! - `claims.rs` - Claim period reads

mod claims;
mod prices;
mod streaks;

use crate::domain::{AssetId, Badge, DayIndex, Decimal, EngineState, PriceObservation};
use crate::store::{DailyUpdate, StoreError, StreakStore};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use std::str::FromStr;

/// Key of the single engine state row.
const ENGINE_STATE_ID: &str = "1";

/// Repository for database operations.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Parse a decimal column, naming the column in the error.
fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(raw)
        .map_err(|e| StoreError::Corrupt(format!("{} {:?}: {}", column, raw, e)))
}

#[async_trait]
impl StreakStore for Repository {
    async fn load_engine_state(&self) -> Result<EngineState, StoreError> {
        Ok(self.get_engine_state().await?.unwrap_or_default())
    }

    async fn load_badge(&self, defaults: &Badge) -> Result<Badge, StoreError> {
        Ok(self
            .get_badge(&defaults.id)
            .await?
            .unwrap_or_else(|| defaults.clone()))
    }

    async fn get_price_observation(
        &self,
        asset: &AssetId,
        day: DayIndex,
    ) -> Result<Option<PriceObservation>, StoreError> {
        Repository::get_price_observation(self, asset, day).await
    }

    async fn commit(&self, update: &DailyUpdate) -> Result<bool, StoreError> {
        Ok(self.commit_daily_update(update).await?)
    }
}
