//! Database migrations and initialization.

use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

/// Open (creating if needed) the SQLite database holding badges, engine
/// state, price observations and claim periods.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await?;

    run_migrations(&pool).await?;

    info!(path = %db_path, "Streak database initialized");
    Ok(pool)
}

/// Run all database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Running streak schema migrations");
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    debug!("Streak schema migrations completed");
    Ok(())
}

/// Configure SQLite pragmas: foreign keys, WAL journaling and a busy timeout.
async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    // journal_mode returns the actual mode set; must use fetch to get result
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    debug!(journal_mode = %journal_mode, "SQLite journal mode");

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn fresh_db() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("streaks.db");
        let pool = init_db(&db_path.to_string_lossy())
            .await
            .expect("init_db failed");
        (pool, temp_dir)
    }

    #[tokio::test]
    async fn test_init_db_creates_missing_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("state").join("nested").join("streaks.db");

        init_db(&db_path.to_string_lossy())
            .await
            .expect("init_db failed");
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_migrations_create_tables_idempotently() {
        let (pool, _temp) = fresh_db().await;
        run_migrations(&pool)
            .await
            .expect("second migration run failed");

        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
                .fetch_all(&pool)
                .await
                .expect("query failed");
        let names: Vec<String> = rows.into_iter().map(|r| r.0).collect();
        assert_eq!(
            names,
            vec!["badges", "claim_periods", "engine_state", "price_observations"]
        );
    }

    #[tokio::test]
    async fn test_claim_period_requires_existing_badge() {
        let (pool, _temp) = fresh_db().await;

        let result = sqlx::query(
            "INSERT INTO claim_periods (id, badge_id, start_day, end_day, streak_length, created_at)
             VALUES ('0x1', 'missing', 1, 4, 3, 0)",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err(), "foreign key should reject unknown badge");
    }

    #[tokio::test]
    async fn test_minimum_streak_must_be_positive() {
        let (pool, _temp) = fresh_db().await;

        let result = sqlx::query(
            "INSERT INTO badges (id, name, delta_threshold, minimum_streak, active_from, updated_at)
             VALUES ('1', 'Winter', '-0.05', 0, 0, 0)",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_journal_mode() {
        let (pool, _temp) = fresh_db().await;

        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        // `journal_mode=WAL` is best-effort; SQLite can fall back depending on environment.
        assert!(
            matches!(result.0.as_str(), "wal" | "delete"),
            "unexpected journal_mode: {}",
            result.0
        );
    }
}
