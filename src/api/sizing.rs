use axum::{extract::State, Json};
use serde::Deserialize;
use std::time::Instant;
use validator::Validate;

use crate::{
    api::{error::ApiError, response::ApiResponse, AppState},
    config::TariffsConfig,
    domain::{BuildingContext, PanelConfig, SizingReport},
    engine::SizingEngine,
};

/// Request to size an installation for one building.
///
/// `tariff_overrides` replaces the configured tariff bundle wholesale for
/// this request; it passes through the same validation as the settings
/// store values.
#[derive(Debug, Deserialize, Validate)]
pub struct EvaluateRequest {
    #[validate(length(min = 1, message = "at least one panel configuration is required"))]
    pub panel_configs: Vec<PanelConfig>,
    pub building: BuildingContext,
    #[serde(default)]
    pub tariff_overrides: Option<TariffsConfig>,
}

/// POST /api/v1/sizing/evaluate - Size and evaluate an installation
pub async fn evaluate_sizing(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<ApiResponse<SizingReport>>, ApiError> {
    request.validate()?;
    if request.building.annual_energy_usage_kwh <= 0.0 {
        return Err(ApiError::ValidationError(
            "annual energy usage must be positive".to_string(),
        ));
    }

    let start = Instant::now();

    let report = match request.tariff_overrides {
        Some(tariffs) => {
            let financial = tariffs
                .into_parameters()
                .map_err(|e| ApiError::ValidationError(e.to_string()))?;
            let engine = SizingEngine::new(financial, state.cfg.sizing.thresholds());
            engine.evaluate(&request.panel_configs, &request.building)?
        }
        None => state
            .engine
            .evaluate(&request.panel_configs, &request.building)?,
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        report_id = %report.id,
        candidates = request.panel_configs.len(),
        smart_max_panels = report.smart_max.panels_count,
        technical_max_panels = report.technical_max.panels_count,
        duration_ms,
        "sizing evaluation completed"
    );

    Ok(Json(ApiResponse::success(report).with_duration(duration_ms)))
}
