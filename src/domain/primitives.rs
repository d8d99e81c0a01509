//! Domain primitives: DayIndex, AssetId, BlockIdentity.

use serde::{Deserialize, Serialize};

/// Length of one streak unit in seconds.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayIndex(pub i64);

impl DayIndex {
    /// Create a DayIndex from a raw day count.
    pub fn new(day: i64) -> Self {
        DayIndex(day)
    }

    /// Day containing the given Unix timestamp (floor division).
    pub fn from_timestamp(timestamp_secs: i64) -> Self {
        DayIndex(timestamp_secs.div_euclid(SECONDS_PER_DAY))
    }

    /// The day `days` before this one.
    pub fn previous(&self, days: i64) -> Self {
        DayIndex(self.0 - days)
    }

    /// Unix timestamp of the first second of this day.
    pub fn start_timestamp(&self) -> i64 {
        self.0 * SECONDS_PER_DAY
    }

    /// Get the underlying day count.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for DayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a tracked asset (token address or symbol), lowercased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct AssetId(String);

impl AssetId {
    /// Create an AssetId, normalizing case and surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Self {
        AssetId(id.as_ref().trim().to_lowercase())
    }

    /// Get the asset id as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        AssetId::new(id)
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of the block that carried a trigger event (usually its hash).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct BlockIdentity(String);

impl BlockIdentity {
    /// Create a BlockIdentity, dropping surrounding whitespace. Case is kept:
    /// ids such as base58 hashes are case-sensitive.
    pub fn new(id: impl AsRef<str>) -> Self {
        BlockIdentity(id.as_ref().trim().to_string())
    }

    /// Stable identity for an event that has no real block behind it.
    ///
    /// Truncating SHA-256 to 16 bytes keeps the key short while leaving
    /// collision odds negligible for one identity per asset and timestamp.
    pub fn synthetic(asset: &AssetId, timestamp_secs: i64) -> Self {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update((asset.as_str().len() as u32).to_le_bytes());
        hasher.update(asset.as_str().as_bytes());
        hasher.update(timestamp_secs.to_le_bytes());

        let hash = hasher.finalize();
        BlockIdentity(format!("hash:{}", hex::encode(&hash[..16])))
    }

    /// Get the identity as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for BlockIdentity {
    fn from(id: String) -> Self {
        BlockIdentity::new(id)
    }
}

impl std::fmt::Display for BlockIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_index_floor_division() {
        assert_eq!(DayIndex::from_timestamp(0), DayIndex(0));
        assert_eq!(DayIndex::from_timestamp(86_399), DayIndex(0));
        assert_eq!(DayIndex::from_timestamp(86_400), DayIndex(1));
        assert_eq!(DayIndex::from_timestamp(1_588_530_377), DayIndex(18_385));
    }

    #[test]
    fn test_day_index_navigation() {
        let day = DayIndex::new(18_400);
        assert_eq!(day.previous(1), DayIndex(18_399));
        assert_eq!(day.previous(2), DayIndex(18_398));
        assert_eq!(DayIndex::from_timestamp(day.start_timestamp()), day);
    }

    #[test]
    fn test_asset_id_normalized() {
        let a = AssetId::new(" 0xC02AAA39b223FE8D0A0e5C4F27eAD9083C756Cc2 ");
        assert_eq!(a.as_str(), "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
    }

    #[test]
    fn test_block_identity_keeps_case() {
        let a = BlockIdentity::new(" 5KJvsngHeMpm ");
        let b: BlockIdentity = serde_json::from_str(r#""5kjvsngHEmpm""#).unwrap();
        assert_eq!(a.as_str(), "5KJvsngHeMpm");
        assert_eq!(b.as_str(), "5kjvsngHEmpm");
        assert_ne!(a, b);
    }

    #[test]
    fn test_synthetic_block_identity_is_stable() {
        let asset = AssetId::new("weth");
        let a = BlockIdentity::synthetic(&asset, 86_400);
        let b = BlockIdentity::synthetic(&asset, 86_400);
        let c = BlockIdentity::synthetic(&asset, 172_800);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_str().starts_with("hash:"));
        assert_eq!(a.as_str().len(), "hash:".len() + 32);
    }

    #[test]
    fn test_day_index_serializes_as_number() {
        assert_eq!(serde_json::to_string(&DayIndex(7)).unwrap(), "7");
    }
}
