//! Replay a CSV of daily prices (`day,price_usd`) through the streak processor.
//!
//! Usage: `replay <prices.csv>` with the same environment as the server.

use anyhow::Context;
use std::sync::Arc;
use streakwatch::replay::{parse_price_csv, replay_prices};
use streakwatch::{config::Config, db::init_db, DailyProcessor, DayGate, Repository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let csv_path = std::env::args()
        .nth(1)
        .context("usage: replay <prices.csv>")?;

    let config = Config::from_env().context("loading configuration")?;
    let csv_bytes =
        std::fs::read(&csv_path).with_context(|| format!("reading {}", csv_path))?;
    let rows = parse_price_csv(&csv_bytes)?;

    let pool = init_db(&config.database_path)
        .await
        .context("initializing database")?;
    let repo = Arc::new(Repository::new(pool));
    let processor = DailyProcessor::new(
        repo.clone(),
        DayGate::new(config.tracked_asset.clone()),
        config.badge.clone(),
    );

    let summary = replay_prices(&repo, &processor, &rows).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
