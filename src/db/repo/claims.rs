//! Claim period reads for the repository.
//!
//! Claim periods are only ever written through `commit_daily_update`.

use crate::domain::{ClaimPeriod, DayIndex};
use crate::store::StoreError;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::Repository;

impl Repository {
    /// Get a claim period by id.
    pub async fn get_claim_period(&self, id: &str) -> Result<Option<ClaimPeriod>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, badge_id, start_day, end_day, streak_length
            FROM claim_periods
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| claim_period_from_row(&r)))
    }

    /// Claim periods of a badge whose end day lies in `[from_day, to_day]`, oldest first.
    pub async fn list_claim_periods(
        &self,
        badge_id: &str,
        from_day: Option<DayIndex>,
        to_day: Option<DayIndex>,
    ) -> Result<Vec<ClaimPeriod>, StoreError> {
        let from_day = from_day.unwrap_or(DayIndex(i64::MIN)).as_i64();
        let to_day = to_day.unwrap_or(DayIndex(i64::MAX)).as_i64();

        let rows = sqlx::query(
            r#"
            SELECT id, badge_id, start_day, end_day, streak_length
            FROM claim_periods
            WHERE badge_id = ? AND end_day >= ? AND end_day <= ?
            ORDER BY end_day ASC, id ASC
            "#,
        )
        .bind(badge_id)
        .bind(from_day)
        .bind(to_day)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(claim_period_from_row).collect())
    }
}

fn claim_period_from_row(row: &SqliteRow) -> ClaimPeriod {
    ClaimPeriod {
        id: row.get("id"),
        badge_id: row.get("badge_id"),
        start_day: DayIndex(row.get("start_day")),
        end_day: DayIndex(row.get("end_day")),
        streak_length: row.get("streak_length"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::setup_test_db;
    use crate::domain::{Badge, BlockIdentity, ClaimPeriod, DayIndex, EngineState};
    use crate::store::DailyUpdate;

    #[tokio::test]
    async fn test_list_claim_periods_filters_by_end_day() {
        let (repo, _temp) = setup_test_db().await;

        for (block, end_day, streak) in [("0xa", 10, 3), ("0xb", 20, 4), ("0xc", 30, 5)] {
            let update = DailyUpdate {
                engine_state: EngineState::with_last_processed_day(DayIndex(end_day)),
                badge: Badge::winter(),
                claim_period: Some(ClaimPeriod::new(
                    &BlockIdentity::new(block),
                    "1",
                    DayIndex(end_day),
                    streak,
                )),
            };
            repo.commit_daily_update(&update).await.unwrap();
        }

        let all = repo.list_claim_periods("1", None, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, "0xa");
        assert_eq!(all[2].start_day, DayIndex(25));

        let middle = repo
            .list_claim_periods("1", Some(DayIndex(15)), Some(DayIndex(25)))
            .await
            .unwrap();
        assert_eq!(middle.len(), 1);
        assert_eq!(middle[0].id, "0xb");

        assert!(repo
            .list_claim_periods("other", None, None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_missing_claim_period_is_none() {
        let (repo, _temp) = setup_test_db().await;
        assert_eq!(repo.get_claim_period("0xnothing").await.unwrap(), None);
    }
}
