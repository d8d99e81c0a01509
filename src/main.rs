use std::net::SocketAddr;
use std::sync::Arc;
use streakwatch::{api, config::Config, db::init_db, DailyProcessor, DayGate, Repository};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match init_db(&config.database_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let repo = Arc::new(Repository::new(pool));
    let processor = Arc::new(DailyProcessor::new(
        repo.clone(),
        DayGate::new(config.tracked_asset.clone()),
        config.badge.clone(),
    ));

    let badge = match processor.current_badge().await {
        Ok(badge) => badge,
        Err(e) => {
            eprintln!("Failed to load badge: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        asset = %config.tracked_asset,
        badge = %badge.id,
        threshold = %badge.delta_threshold,
        minimum_streak = badge.minimum_streak_length,
        current_streak = badge.current_streak,
        "Tracking badge streak"
    );

    let port = config.port;
    let app = api::create_router(api::AppState::new(repo, config, processor));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
