//! Inputs consumed by the streak engine: trigger events and daily prices.

use crate::domain::{AssetId, BlockIdentity, DayIndex, Decimal};
use serde::{Deserialize, Serialize};

/// An event that may open a new day for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    /// Block timestamp in seconds since Unix epoch.
    pub block_timestamp: i64,
    pub block_identity: BlockIdentity,
    pub asset_id: AssetId,
}

impl TriggerEvent {
    pub fn new(block_timestamp: i64, block_identity: BlockIdentity, asset_id: AssetId) -> Self {
        Self {
            block_timestamp,
            block_identity,
            asset_id,
        }
    }

    /// Day the event's block falls in.
    pub fn day_index(&self) -> DayIndex {
        DayIndex::from_timestamp(self.block_timestamp)
    }
}

/// Daily USD price for one asset, produced upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    pub asset_id: AssetId,
    pub day: DayIndex,
    #[serde(rename = "priceUSD")]
    pub price_usd: Decimal,
}

impl PriceObservation {
    pub fn new(asset_id: AssetId, day: DayIndex, price_usd: Decimal) -> Self {
        Self {
            asset_id,
            day,
            price_usd,
        }
    }
}
