use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::{AssetId, BlockIdentity, TriggerEvent};
use crate::error::AppError;
use crate::processor::DailyOutcome;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRequest {
    pub block_timestamp: i64,
    pub block_identity: String,
    pub asset_id: String,
}

impl ObservationRequest {
    fn into_event(self) -> Result<TriggerEvent, AppError> {
        if self.block_timestamp < 0 {
            return Err(AppError::BadRequest(
                "blockTimestamp must not be negative".into(),
            ));
        }
        let block_identity = BlockIdentity::new(&self.block_identity);
        if block_identity.is_empty() {
            return Err(AppError::BadRequest("blockIdentity must not be empty".into()));
        }
        Ok(TriggerEvent::new(
            self.block_timestamp,
            block_identity,
            AssetId::new(&self.asset_id),
        ))
    }
}

/// Feed one trigger event to the streak processor.
pub async fn post_observation(
    State(state): State<AppState>,
    Json(request): Json<ObservationRequest>,
) -> Result<Json<DailyOutcome>, AppError> {
    let event = request.into_event()?;
    let outcome = state.processor.on_daily_observation(&event).await?;
    Ok(Json(outcome))
}
