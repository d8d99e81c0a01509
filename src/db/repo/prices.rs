//! Price observation operations for the repository.

use crate::domain::{AssetId, DayIndex, PriceObservation};
use crate::store::StoreError;
use sqlx::Row;

use super::{parse_decimal, Repository};

impl Repository {
    /// Insert or replace the price for an (asset, day).
    ///
    /// # Errors
    /// Returns an error if the upsert fails.
    pub async fn upsert_price_observation(
        &self,
        observation: &PriceObservation,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO price_observations (asset_id, day, price_usd, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(asset_id, day) DO UPDATE SET
                price_usd = excluded.price_usd,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(observation.asset_id.as_str())
        .bind(observation.day.as_i64())
        .bind(observation.price_usd.to_canonical_string())
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Upsert many price observations in a single transaction.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub async fn upsert_price_observations_batch(
        &self,
        observations: &[PriceObservation],
    ) -> Result<usize, sqlx::Error> {
        if observations.is_empty() {
            return Ok(0);
        }

        let updated_at = chrono::Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        for observation in observations {
            sqlx::query(
                r#"
                INSERT INTO price_observations (asset_id, day, price_usd, updated_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(asset_id, day) DO UPDATE SET
                    price_usd = excluded.price_usd,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(observation.asset_id.as_str())
            .bind(observation.day.as_i64())
            .bind(observation.price_usd.to_canonical_string())
            .bind(updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(observations.len())
    }

    /// Look up the price of `asset` on `day`.
    pub async fn get_price_observation(
        &self,
        asset: &AssetId,
        day: DayIndex,
    ) -> Result<Option<PriceObservation>, StoreError> {
        let row = sqlx::query(
            "SELECT price_usd FROM price_observations WHERE asset_id = ? AND day = ?",
        )
        .bind(asset.as_str())
        .bind(day.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| {
            let raw: String = r.get("price_usd");
            let price_usd = parse_decimal("price_usd", &raw)?;
            Ok(PriceObservation::new(asset.clone(), day, price_usd))
        })
        .transpose()
    }
}
