//! Backfill: import a CSV of daily prices and replay the days through the processor.
//!
//! CSV format (header required): `day,price_usd`.

use crate::db::Repository;
use crate::domain::{BlockIdentity, DayIndex, Decimal, PriceObservation, TriggerEvent};
use crate::processor::{DailyOutcome, DailyProcessor, ProcessError};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("csv parse error: {0}")]
    Csv(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Process(#[from] ProcessError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    pub day: DayIndex,
    pub price_usd: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub prices_imported: usize,
    pub days_processed: usize,
    pub days_already_processed: usize,
    pub claim_periods_created: usize,
}

pub fn parse_price_csv(csv_bytes: &[u8]) -> Result<Vec<PriceRow>, ReplayError> {
    #[derive(Debug, serde::Deserialize)]
    struct Row {
        day: i64,
        price_usd: String,
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_bytes);

    let mut rows = Vec::new();
    for record in reader.deserialize::<Row>() {
        let row = record.map_err(|e| ReplayError::Csv(e.to_string()))?;
        if row.day < 0 {
            return Err(ReplayError::Csv(format!("negative day: {}", row.day)));
        }
        let price_usd = Decimal::from_str_canonical(&row.price_usd)
            .map_err(|e| ReplayError::Csv(format!("invalid price_usd: {}", e)))?;
        if price_usd < Decimal::zero() {
            return Err(ReplayError::Csv(format!("negative price_usd: {}", row.price_usd)));
        }
        rows.push(PriceRow {
            day: DayIndex(row.day),
            price_usd,
        });
    }

    Ok(rows)
}

/// Store `rows` as prices of the tracked asset, then fire one synthetic
/// event at the start of each day whose two preceding days are covered.
///
/// Events run in ascending day order, so the outcome matches a live feed
/// that delivered the same days in order.
pub async fn replay_prices(
    repo: &Repository,
    processor: &DailyProcessor,
    rows: &[PriceRow],
) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();
    let (Some(first), Some(last)) = (
        rows.iter().map(|r| r.day).min(),
        rows.iter().map(|r| r.day).max(),
    ) else {
        return Ok(summary);
    };

    let asset = processor.gate().tracked_asset().clone();
    let observations: Vec<PriceObservation> = rows
        .iter()
        .map(|r| PriceObservation::new(asset.clone(), r.day, r.price_usd))
        .collect();
    summary.prices_imported = repo.upsert_price_observations_batch(&observations).await?;

    for day in (first.as_i64() + 2)..=(last.as_i64() + 1) {
        let timestamp = DayIndex(day).start_timestamp();
        let event = TriggerEvent::new(
            timestamp,
            BlockIdentity::synthetic(&asset, timestamp),
            asset.clone(),
        );

        match processor.on_daily_observation(&event).await? {
            DailyOutcome::AlreadyProcessed { .. } => summary.days_already_processed += 1,
            DailyOutcome::Claimed { inserted, .. } => {
                summary.days_processed += 1;
                if inserted {
                    summary.claim_periods_created += 1;
                }
            }
            _ => summary.days_processed += 1,
        }
    }

    info!(
        asset = %asset,
        first_day = %first,
        last_day = %last,
        prices_imported = summary.prices_imported,
        days_processed = summary.days_processed,
        claim_periods_created = summary.claim_periods_created,
        "Price replay finished"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_csv() {
        let csv = b"day,price_usd\n18400, 100\n18401,94.5\n";
        let rows = parse_price_csv(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].day, DayIndex(18_400));
        assert_eq!(rows[1].price_usd.to_canonical_string(), "94.5");
    }

    #[test]
    fn test_parse_price_csv_rejects_bad_price() {
        let err = parse_price_csv(b"day,price_usd\n1,abc\n").unwrap_err();
        assert!(matches!(err, ReplayError::Csv(_)));

        let err = parse_price_csv(b"day,price_usd\n1,-3\n").unwrap_err();
        assert!(err.to_string().contains("negative price_usd"));
    }

    #[test]
    fn test_parse_price_csv_rejects_missing_column() {
        assert!(parse_price_csv(b"day\n1\n").is_err());
    }
}
