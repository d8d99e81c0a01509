use crate::domain::{AssetId, Badge, DayIndex, Decimal};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// The one asset whose daily prices drive the streak.
    pub tracked_asset: AssetId,
    /// Badge written on first use; the stored row wins afterwards.
    pub badge: Badge,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = parse_or(&env_map, "PORT", "8080", "must be a valid u16")?;

        let database_path = required(&env_map, "DATABASE_PATH")?;

        let tracked_asset = AssetId::new(required(&env_map, "TRACKED_ASSET")?);
        if tracked_asset.as_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "TRACKED_ASSET".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let badge = badge_from_map(&env_map)?;

        Ok(Config {
            port,
            database_path,
            tracked_asset,
            badge,
        })
    }
}

fn required(env_map: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    env_map
        .get(key)
        .cloned()
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}

fn parse_or<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: &str,
    expectation: &str,
) -> Result<T, ConfigError> {
    env_map
        .get(key)
        .map(|s| s.as_str())
        .unwrap_or(default)
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue(key.to_string(), expectation.to_string()))
}

fn badge_from_map(env_map: &HashMap<String, String>) -> Result<Badge, ConfigError> {
    let defaults = Badge::winter();

    let id = env_map.get("BADGE_ID").cloned().unwrap_or(defaults.id);
    let name = env_map.get("BADGE_NAME").cloned().unwrap_or(defaults.name);

    let delta_threshold = match env_map.get("BADGE_DELTA_THRESHOLD") {
        Some(raw) => Decimal::from_str_canonical(raw).map_err(|_| {
            ConfigError::InvalidValue(
                "BADGE_DELTA_THRESHOLD".to_string(),
                format!("must be a decimal fraction, got {}", raw),
            )
        })?,
        None => defaults.delta_threshold,
    };

    let minimum_streak_length: i64 = parse_or(
        env_map,
        "BADGE_MINIMUM_STREAK",
        &defaults.minimum_streak_length.to_string(),
        "must be an integer",
    )?;
    if minimum_streak_length < 1 {
        return Err(ConfigError::InvalidValue(
            "BADGE_MINIMUM_STREAK".to_string(),
            "must be at least 1".to_string(),
        ));
    }

    let active_from: i64 = parse_or(
        env_map,
        "BADGE_ACTIVE_FROM",
        &defaults.active_from.to_string(),
        "must be a day index",
    )?;
    let active_until: i64 = parse_or(env_map, "BADGE_ACTIVE_UNTIL", "-1", "must be a day index")?;
    let active_until = match active_until {
        -1 => None,
        day if day >= active_from => Some(DayIndex(day)),
        _ => {
            return Err(ConfigError::InvalidValue(
                "BADGE_ACTIVE_UNTIL".to_string(),
                "must be -1 or not before BADGE_ACTIVE_FROM".to_string(),
            ))
        }
    };

    Ok(Badge {
        id,
        name,
        delta_threshold,
        minimum_streak_length,
        current_streak: 0,
        active_from: DayIndex(active_from),
        active_until,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("DATABASE_PATH".to_string(), "/tmp/streaks.db".to_string());
        map.insert(
            "TRACKED_ASSET".to_string(),
            "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".to_string(),
        );
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.tracked_asset.as_str(),
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
        assert_eq!(config.badge, Badge::winter());
    }

    #[test]
    fn test_missing_database_path() {
        let mut env_map = setup_required_env();
        env_map.remove("DATABASE_PATH");
        match Config::from_env_map(env_map) {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "DATABASE_PATH"),
            other => panic!("Expected MissingEnv error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_tracked_asset() {
        let mut env_map = setup_required_env();
        env_map.remove("TRACKED_ASSET");
        match Config::from_env_map(env_map) {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "TRACKED_ASSET"),
            other => panic!("Expected MissingEnv error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_upward_badge_overrides() {
        let mut env_map = setup_required_env();
        env_map.insert("BADGE_ID".to_string(), "summer".to_string());
        env_map.insert("BADGE_NAME".to_string(), "Summer".to_string());
        env_map.insert("BADGE_DELTA_THRESHOLD".to_string(), "0.1".to_string());
        env_map.insert("BADGE_MINIMUM_STREAK".to_string(), "5".to_string());
        env_map.insert("BADGE_ACTIVE_FROM".to_string(), "19000".to_string());
        env_map.insert("BADGE_ACTIVE_UNTIL".to_string(), "19100".to_string());

        let badge = Config::from_env_map(env_map).unwrap().badge;
        assert_eq!(badge.id, "summer");
        assert_eq!(badge.name, "Summer");
        assert_eq!(badge.delta_threshold.to_canonical_string(), "0.1");
        assert_eq!(badge.minimum_streak_length, 5);
        assert_eq!(badge.active_from, DayIndex(19_000));
        assert_eq!(badge.active_until, Some(DayIndex(19_100)));
    }

    #[test]
    fn test_invalid_threshold() {
        let mut env_map = setup_required_env();
        env_map.insert("BADGE_DELTA_THRESHOLD".to_string(), "-5%".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "BADGE_DELTA_THRESHOLD"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_minimum_streak_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("BADGE_MINIMUM_STREAK".to_string(), "0".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "BADGE_MINIMUM_STREAK"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_window_end_before_start_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("BADGE_ACTIVE_FROM".to_string(), "100".to_string());
        env_map.insert("BADGE_ACTIVE_UNTIL".to_string(), "50".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "BADGE_ACTIVE_UNTIL"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }
}
