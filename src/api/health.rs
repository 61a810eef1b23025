use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
}

/// GET /api/v1/healthz - Health check endpoint
///
/// The engine has no external dependencies, so health reduces to the
/// process being up and able to serve.
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
    };

    (StatusCode::OK, Json(response))
}

/// GET /health/ready - Readiness probe for Kubernetes
pub async fn readiness_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /health/live - Liveness probe for Kubernetes
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
