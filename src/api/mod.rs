pub mod badge;
pub mod claim_periods;
pub mod health;
pub mod observations;
pub mod prices;

use crate::config::Config;
use crate::db::Repository;
use crate::processor::DailyProcessor;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Config,
    pub processor: Arc<DailyProcessor>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config, processor: Arc<DailyProcessor>) -> Self {
        Self {
            repo,
            config,
            processor,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/observations", post(observations::post_observation))
        .route("/v1/prices", put(prices::put_price))
        .route("/v1/badge", get(badge::get_badge))
        .route("/v1/state", get(badge::get_state))
        .route("/v1/claim-periods", get(claim_periods::get_claim_periods))
        .route(
            "/v1/claim-periods/:id",
            get(claim_periods::get_claim_period),
        )
        .layer(cors)
        .with_state(state)
}
