use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{BlockIdentity, ClaimPeriod, DayIndex};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPeriodsQuery {
    pub from_day: Option<i64>,
    pub to_day: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPeriodsResponse {
    pub badge_id: String,
    pub claim_periods: Vec<ClaimPeriod>,
}

/// Claim periods of the configured badge, filtered by end day.
pub async fn get_claim_periods(
    Query(params): Query<ClaimPeriodsQuery>,
    State(state): State<AppState>,
) -> Result<Json<ClaimPeriodsResponse>, AppError> {
    if let (Some(from_day), Some(to_day)) = (params.from_day, params.to_day) {
        if from_day > to_day {
            return Err(AppError::BadRequest("fromDay must be <= toDay".into()));
        }
    }

    let badge_id = state.processor.badge_id().to_string();
    let claim_periods = state
        .repo
        .list_claim_periods(
            &badge_id,
            params.from_day.map(DayIndex),
            params.to_day.map(DayIndex),
        )
        .await?;

    Ok(Json(ClaimPeriodsResponse {
        badge_id,
        claim_periods,
    }))
}

/// A single claim period by id (the block identity that ended the streak).
pub async fn get_claim_period(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ClaimPeriod>, AppError> {
    let id = ClaimPeriod::derive_id(&BlockIdentity::new(&id));
    state
        .repo
        .get_claim_period(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("claim period {}", id)))
}
