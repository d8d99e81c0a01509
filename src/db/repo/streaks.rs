//! Badge and engine state operations, plus the atomic daily commit.

use crate::domain::{Badge, DayIndex, EngineState};
use crate::store::{DailyUpdate, StoreError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};

use super::{parse_decimal, Repository, ENGINE_STATE_ID};

/// Stored value for a badge without an end day.
const UNBOUNDED: i64 = -1;

impl Repository {
    /// Get the engine state row, if it was ever written.
    pub async fn get_engine_state(&self) -> Result<Option<EngineState>, sqlx::Error> {
        let row = sqlx::query("SELECT last_processed_day FROM engine_state WHERE id = ?")
            .bind(ENGINE_STATE_ID)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| {
            let day: i64 = r.get("last_processed_day");
            EngineState::with_last_processed_day(DayIndex(day))
        }))
    }

    /// Get a badge by id.
    ///
    /// # Errors
    /// Returns `StoreError::Corrupt` if the stored threshold is not a decimal.
    pub async fn get_badge(&self, id: &str) -> Result<Option<Badge>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, delta_threshold, minimum_streak, current_streak,
                   active_from, active_until
            FROM badges
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| badge_from_row(&r)).transpose()
    }

    /// Insert or overwrite a badge.
    pub async fn upsert_badge(&self, badge: &Badge) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        upsert_badge_tx(&mut tx, badge).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Write engine state, badge and (if absent) the claim period in one transaction.
    ///
    /// Returns whether a claim period row was inserted.
    ///
    /// # Errors
    /// Returns an error if any statement fails; nothing is written in that case.
    pub async fn commit_daily_update(&self, update: &DailyUpdate) -> Result<bool, sqlx::Error> {
        let now = chrono::Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO engine_state (id, last_processed_day, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                last_processed_day = MAX(engine_state.last_processed_day, excluded.last_processed_day),
                updated_at = excluded.updated_at
            "#,
        )
        .bind(ENGINE_STATE_ID)
        .bind(update.engine_state.last_processed_day.as_i64())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        upsert_badge_tx(&mut tx, &update.badge).await?;

        let mut inserted = false;
        if let Some(period) = &update.claim_period {
            let result = sqlx::query(
                r#"
                INSERT INTO claim_periods (id, badge_id, start_day, end_day, streak_length, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO NOTHING
                "#,
            )
            .bind(&period.id)
            .bind(&period.badge_id)
            .bind(period.start_day.as_i64())
            .bind(period.end_day.as_i64())
            .bind(period.streak_length)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            inserted = result.rows_affected() > 0;
        }

        tx.commit().await?;
        Ok(inserted)
    }
}

async fn upsert_badge_tx(
    tx: &mut Transaction<'_, Sqlite>,
    badge: &Badge,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO badges (
            id, name, delta_threshold, minimum_streak, current_streak,
            active_from, active_until, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            delta_threshold = excluded.delta_threshold,
            minimum_streak = excluded.minimum_streak,
            current_streak = excluded.current_streak,
            active_from = excluded.active_from,
            active_until = excluded.active_until,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&badge.id)
    .bind(&badge.name)
    .bind(badge.delta_threshold.to_canonical_string())
    .bind(badge.minimum_streak_length)
    .bind(badge.current_streak)
    .bind(badge.active_from.as_i64())
    .bind(badge.active_until.map_or(UNBOUNDED, |d| d.as_i64()))
    .bind(chrono::Utc::now().timestamp())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

fn badge_from_row(row: &SqliteRow) -> Result<Badge, StoreError> {
    let threshold: String = row.get("delta_threshold");
    let active_until: i64 = row.get("active_until");

    Ok(Badge {
        id: row.get("id"),
        name: row.get("name"),
        delta_threshold: parse_decimal("delta_threshold", &threshold)?,
        minimum_streak_length: row.get("minimum_streak"),
        current_streak: row.get("current_streak"),
        active_from: DayIndex(row.get("active_from")),
        active_until: (active_until != UNBOUNDED).then_some(DayIndex(active_until)),
    })
}
