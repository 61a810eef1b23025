use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;
use validator::Validate;

use crate::domain::FinancialParameters;
use crate::engine::SmartMaxThresholds;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub tariffs: TariffsConfig,
    pub sizing: SizingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Tariff and lifecycle settings as they arrive from the settings store.
///
/// This is the loosely-typed boundary shape; [`TariffsConfig::into_parameters`]
/// validates it once and freezes it into the immutable
/// [`FinancialParameters`] used by every engine function.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TariffsConfig {
    #[validate(range(min = 0.0))]
    pub energy_price_snt: f64,
    #[validate(range(min = 0.0))]
    pub transmission_price_snt: f64,
    #[validate(range(min = 0.0))]
    pub electricity_tax_snt: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub vat_pct: f64,
    #[validate(range(min = 0.0))]
    pub installation_cost_per_kwp_eur: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub maintenance_cost_factor_pct: f64,
    #[validate(range(min = 0.000001, max = 100.0))]
    pub efficiency_depreciation_factor_pct: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub cost_increase_factor_pct: f64,
    #[validate(range(min = 1))]
    pub installation_lifespan_years: u32,
    #[validate(range(min = 0.0, max = 100.0))]
    pub inverter_replacement_cost_factor_pct: f64,
    #[validate(range(min = 0.0))]
    pub loan_principal_eur: f64,
    pub loan_duration_years: u32,
    #[validate(range(min = 0.0, max = 100.0))]
    pub interest_rate_pct: f64,
    #[validate(range(min = 0.0))]
    pub emissions_factor_g_per_kwh: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub excess_energy_rate_pct: f64,
    #[validate(range(min = 0.0))]
    pub excess_sale_price_snt: f64,
    #[validate(range(min = 0.0))]
    pub daily_max_utilization_factor: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount_rate_pct: f64,
    #[validate(range(min = 0.01, max = 1.0))]
    pub dc_to_ac_derate: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub tilt_boost_factor_pct: f64,
    #[validate(range(min = 1.0))]
    pub panel_wattage_w: f64,
}

impl TariffsConfig {
    /// Validate once at the boundary and freeze into the immutable
    /// parameter bundle.
    pub fn into_parameters(self) -> Result<FinancialParameters> {
        self.validate()?;
        Ok(FinancialParameters {
            energy_price_snt: self.energy_price_snt,
            transmission_price_snt: self.transmission_price_snt,
            electricity_tax_snt: self.electricity_tax_snt,
            vat_pct: self.vat_pct,
            installation_cost_per_kwp_eur: self.installation_cost_per_kwp_eur,
            maintenance_cost_factor_pct: self.maintenance_cost_factor_pct,
            efficiency_depreciation_factor_pct: self.efficiency_depreciation_factor_pct,
            cost_increase_factor_pct: self.cost_increase_factor_pct,
            installation_lifespan_years: self.installation_lifespan_years,
            inverter_replacement_cost_factor_pct: self.inverter_replacement_cost_factor_pct,
            loan_principal_eur: self.loan_principal_eur,
            loan_duration_years: self.loan_duration_years,
            interest_rate_pct: self.interest_rate_pct,
            emissions_factor_g_per_kwh: self.emissions_factor_g_per_kwh,
            excess_energy_rate_pct: self.excess_energy_rate_pct,
            excess_sale_price_snt: self.excess_sale_price_snt,
            daily_max_utilization_factor: self.daily_max_utilization_factor,
            discount_rate_pct: self.discount_rate_pct,
            dc_to_ac_derate: self.dc_to_ac_derate,
            tilt_boost_factor_pct: self.tilt_boost_factor_pct,
            panel_wattage_w: self.panel_wattage_w,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SizingConfig {
    pub smart_max_range_start: f64,
    pub smart_max_range_end: f64,
    pub smart_max_relative_threshold_pct: f64,
    pub smart_max_fallback_threshold: f64,
}

impl SizingConfig {
    pub fn thresholds(&self) -> SmartMaxThresholds {
        SmartMaxThresholds {
            range_start: self.smart_max_range_start,
            range_end: self.smart_max_range_end,
            relative_threshold_pct: self.smart_max_relative_threshold_pct,
            fallback_absolute_threshold: self.smart_max_fallback_threshold,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("SIZER__").split("__"));
        Ok(figment.extract()?)
    }
}
