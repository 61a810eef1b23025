pub mod error;
pub mod health;
pub mod response;
pub mod sizing;
pub mod v1;

use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::Config, engine::SizingEngine};

/// Shared application state: the validated configuration and the sizing
/// engine built from it at startup.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub engine: Arc<SizingEngine>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self> {
        let financial = cfg.tariffs.clone().into_parameters()?;
        let engine = Arc::new(SizingEngine::new(financial, cfg.sizing.thresholds()));
        Ok(Self { cfg, engine })
    }
}

pub fn router(state: AppState, cfg: &Config) -> Router {
    let mut router = Router::new()
        .nest("/api/v1", v1::router(state))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check));

    if cfg.server.enable_cors {
        use tower_http::cors::{AllowOrigin, CorsLayer};
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::exact("http://localhost:3000".parse().unwrap()))
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE]);
        router = router.layer(cors);
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    cfg.server.request_timeout_secs,
                ))),
        )
        .layer(TraceLayer::new_for_http())
}
