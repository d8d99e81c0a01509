use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::domain::Badge;
use crate::error::AppError;
use crate::store::StreakStore;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeResponse {
    pub id: String,
    pub name: String,
    pub delta_threshold: String,
    pub minimum_streak_length: i64,
    pub current_streak: i64,
    pub active_from: i64,
    /// `-1` when the badge has no end day.
    pub active_until: i64,
}

impl From<Badge> for BadgeResponse {
    fn from(badge: Badge) -> Self {
        Self {
            id: badge.id,
            name: badge.name,
            delta_threshold: badge.delta_threshold.to_canonical_string(),
            minimum_streak_length: badge.minimum_streak_length,
            current_streak: badge.current_streak,
            active_from: badge.active_from.as_i64(),
            active_until: badge.active_until.map_or(-1, |d| d.as_i64()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub tracked_asset: String,
    pub last_processed_day: i64,
    /// ISO date of `last_processed_day`, absent before the first processed day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_processed_date: Option<String>,
}

/// Current badge configuration and streak (defaults if nothing was processed yet).
pub async fn get_badge(State(state): State<AppState>) -> Result<Json<BadgeResponse>, AppError> {
    let badge = state.processor.current_badge().await?;
    Ok(Json(badge.into()))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<StateResponse>, AppError> {
    let engine_state = state.repo.load_engine_state().await?;
    let last_processed_date = if engine_state.is_pristine() {
        None
    } else {
        let start = engine_state.last_processed_day.start_timestamp();
        chrono::DateTime::<chrono::Utc>::from_timestamp(start, 0)
            .map(|t| t.date_naive().to_string())
    };

    Ok(Json(StateResponse {
        tracked_asset: state.config.tracked_asset.to_string(),
        last_processed_day: engine_state.last_processed_day.as_i64(),
        last_processed_date,
    }))
}
