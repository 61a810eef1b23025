use serde::{Deserialize, Serialize};

use super::profile::MonthlyProfile;

/// Immutable bundle of tariff and lifecycle constants.
///
/// Built once at the configuration boundary (see `config::TariffsConfig`)
/// and passed by shared reference into every pure engine function. Unit
/// prices are in snt/kWh, money amounts in EUR, factors named `_pct` are
/// on the 0-100 percent scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialParameters {
    pub energy_price_snt: f64,
    pub transmission_price_snt: f64,
    pub electricity_tax_snt: f64,
    pub vat_pct: f64,
    pub installation_cost_per_kwp_eur: f64,
    pub maintenance_cost_factor_pct: f64,
    pub efficiency_depreciation_factor_pct: f64,
    pub cost_increase_factor_pct: f64,
    pub installation_lifespan_years: u32,
    pub inverter_replacement_cost_factor_pct: f64,
    pub loan_principal_eur: f64,
    pub loan_duration_years: u32,
    pub interest_rate_pct: f64,
    /// Grid emissions intensity in g CO2 per kWh.
    pub emissions_factor_g_per_kwh: f64,
    /// Share of yearly production exported instead of self-consumed.
    pub excess_energy_rate_pct: f64,
    pub excess_sale_price_snt: f64,
    pub daily_max_utilization_factor: f64,
    pub discount_rate_pct: f64,
    pub dc_to_ac_derate: f64,
    pub tilt_boost_factor_pct: f64,
    pub panel_wattage_w: f64,
}

impl FinancialParameters {
    /// Retail price of a consumed kWh: energy price plus transmission and
    /// tax, the latter two subject to VAT.
    pub fn total_energy_price_snt_per_kwh(&self) -> f64 {
        self.energy_price_snt
            + (self.transmission_price_snt + self.electricity_tax_snt) * (1.0 + self.vat_pct / 100.0)
    }

    /// Fraction of yearly production consumed on site.
    pub fn self_use_share(&self) -> f64 {
        1.0 - self.excess_energy_rate_pct / 100.0
    }

    /// Fraction of yearly production sold to the grid.
    pub fn excess_share(&self) -> f64 {
        self.excess_energy_rate_pct / 100.0
    }

    /// Combined DC->AC conversion factor including the tilt boost.
    pub fn ac_conversion_factor(&self) -> f64 {
        self.dc_to_ac_derate * (1.0 + self.tilt_boost_factor_pct / 100.0)
    }
}

impl Default for FinancialParameters {
    fn default() -> Self {
        Self {
            energy_price_snt: 8.5,
            transmission_price_snt: 5.0,
            electricity_tax_snt: 2.79,
            vat_pct: 25.5,
            installation_cost_per_kwp_eur: 1500.0,
            maintenance_cost_factor_pct: 1.0,
            efficiency_depreciation_factor_pct: 0.5,
            cost_increase_factor_pct: 2.0,
            installation_lifespan_years: 25,
            inverter_replacement_cost_factor_pct: 20.0,
            loan_principal_eur: 0.0,
            loan_duration_years: 10,
            interest_rate_pct: 4.0,
            emissions_factor_g_per_kwh: 100.0,
            excess_energy_rate_pct: 40.0,
            excess_sale_price_snt: 5.0,
            daily_max_utilization_factor: 1.2,
            discount_rate_pct: 3.0,
            dc_to_ac_derate: 0.85,
            tilt_boost_factor_pct: 10.0,
            panel_wattage_w: 400.0,
        }
    }
}

/// Building-specific inputs supplied by external collaborators: the
/// consumption level and seasonality, the production seasonality of a
/// representative panel, and the roof geometry used for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingContext {
    pub annual_energy_usage_kwh: f64,
    pub load_profile: MonthlyProfile,
    pub production_profile: MonthlyProfile,
    pub usable_roof_area_m2: f64,
    pub panel_area_m2: f64,
}
