use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::{AssetId, DayIndex, Decimal, PriceObservation};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub asset_id: String,
    pub day: i64,
    #[serde(rename = "priceUSD")]
    pub price_usd: String,
}

/// Record the daily price of an asset, replacing any earlier value for that day.
pub async fn put_price(
    State(state): State<AppState>,
    Json(request): Json<PriceRequest>,
) -> Result<StatusCode, AppError> {
    if request.day < 0 {
        return Err(AppError::BadRequest("day must not be negative".into()));
    }
    let price_usd = Decimal::from_str_canonical(&request.price_usd)
        .map_err(|_| AppError::BadRequest("priceUSD must be a decimal string".into()))?;
    if price_usd < Decimal::zero() {
        return Err(AppError::BadRequest("priceUSD must not be negative".into()));
    }

    let observation = PriceObservation::new(
        AssetId::new(&request.asset_id),
        DayIndex(request.day),
        price_usd,
    );
    state.repo.upsert_price_observation(&observation).await?;

    Ok(StatusCode::NO_CONTENT)
}
