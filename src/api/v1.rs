use axum::{
    routing::{get, post},
    Router,
};

use crate::api::{health, sizing, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sizing/evaluate", post(sizing::evaluate_sizing))
        .route("/healthz", get(health::health_check))
        .with_state(state)
}
