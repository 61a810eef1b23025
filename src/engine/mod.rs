pub mod catalog;
pub mod cashflow;
pub mod error;
pub mod evaluator;
pub mod score;
pub mod selector;

pub use catalog::Catalog;
pub use cashflow::{CashFlowSeries, IrrOutcome};
pub use error::EngineError;
pub use score::PeerContext;
pub use selector::SmartMaxThresholds;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{BuildingContext, FinancialParameters, PanelConfig, SizingReport};

/// The sizing-and-financial-evaluation engine.
///
/// Owns the validated tariff parameters and the smart-max tuning; every
/// call to [`SizingEngine::evaluate`] is a pure synchronous computation
/// over its inputs, deterministic apart from the report id and timestamp.
#[derive(Debug, Clone)]
pub struct SizingEngine {
    financial: FinancialParameters,
    thresholds: SmartMaxThresholds,
}

impl SizingEngine {
    pub fn new(financial: FinancialParameters, thresholds: SmartMaxThresholds) -> Self {
        Self {
            financial,
            thresholds,
        }
    }

    pub fn financial(&self) -> &FinancialParameters {
        &self.financial
    }

    /// Size the installation for one building: derive the catalog, pick
    /// the meaningful configurations, and produce the full lifecycle
    /// financial result for each.
    pub fn evaluate(
        &self,
        raw_configs: &[PanelConfig],
        building: &BuildingContext,
    ) -> Result<SizingReport, EngineError> {
        let catalog = catalog::build(raw_configs, &self.financial)?;

        let smart = selector::smart_max(&catalog, &self.thresholds);
        let technical = selector::technical_max(&catalog);
        let target = selector::target(&catalog, building.annual_energy_usage_kwh);
        let optimized = selector::optimized(
            &catalog,
            building,
            self.financial.daily_max_utilization_factor,
        );

        tracing::debug!(
            smart_max_panels = smart.panels_count,
            technical_max_panels = technical.panels_count,
            target_panels = target.map(|c| c.panels_count),
            optimized_panels = optimized.map(|c| c.panels_count),
            "configurations selected"
        );

        // The smart-max yield anchors every utilization score, so it is
        // fixed before any configuration is evaluated.
        let peer = PeerContext {
            smart_max_ac_kwh: smart.yearly_energy_ac_kwh,
        };

        let smart_max = evaluator::evaluate(smart, &self.financial, building, &peer)?;
        let technical_max = evaluator::evaluate(technical, &self.financial, building, &peer)?;
        let target = target
            .map(|config| evaluator::evaluate(config, &self.financial, building, &peer))
            .transpose()?;
        let optimized = optimized
            .map(|config| evaluator::evaluate(config, &self.financial, building, &peer))
            .transpose()?;

        Ok(SizingReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            technical_max,
            smart_max,
            target,
            optimized,
        })
    }
}
