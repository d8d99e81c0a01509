//! In-process store for tests and dry runs.

use super::{DailyUpdate, StoreError, StreakStore};
use crate::domain::{AssetId, Badge, ClaimPeriod, DayIndex, Decimal, EngineState, PriceObservation};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Records {
    engine_state: Option<EngineState>,
    badges: HashMap<String, Badge>,
    prices: HashMap<(AssetId, DayIndex), PriceObservation>,
    claim_periods: BTreeMap<String, ClaimPeriod>,
}

/// Store backed by plain collections behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a daily price observation.
    pub fn with_price(self, asset: &AssetId, day: i64, price_usd: Decimal) -> Self {
        self.insert_price(PriceObservation::new(asset.clone(), DayIndex(day), price_usd));
        self
    }

    /// Add or replace a daily price observation.
    pub fn insert_price(&self, observation: PriceObservation) {
        let mut records = self.lock();
        records
            .prices
            .insert((observation.asset_id.clone(), observation.day), observation);
    }

    /// All claim periods ordered by id.
    pub fn claim_periods(&self) -> Vec<ClaimPeriod> {
        self.lock().claim_periods.values().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Records> {
        // Every write replaces whole entries, so a poisoned map is still consistent.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl StreakStore for MemoryStore {
    async fn load_engine_state(&self) -> Result<EngineState, StoreError> {
        Ok(self.lock().engine_state.unwrap_or_default())
    }

    async fn load_badge(&self, defaults: &Badge) -> Result<Badge, StoreError> {
        Ok(self
            .lock()
            .badges
            .get(&defaults.id)
            .cloned()
            .unwrap_or_else(|| defaults.clone()))
    }

    async fn get_price_observation(
        &self,
        asset: &AssetId,
        day: DayIndex,
    ) -> Result<Option<PriceObservation>, StoreError> {
        Ok(self.lock().prices.get(&(asset.clone(), day)).cloned())
    }

    async fn commit(&self, update: &DailyUpdate) -> Result<bool, StoreError> {
        let mut records = self.lock();
        records.engine_state = Some(update.engine_state);
        records
            .badges
            .insert(update.badge.id.clone(), update.badge.clone());

        let Some(period) = &update.claim_period else {
            return Ok(false);
        };
        if records.claim_periods.contains_key(&period.id) {
            return Ok(false);
        }
        records
            .claim_periods
            .insert(period.id.clone(), period.clone());
        Ok(true)
    }
}
