use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Normalized 0-100 scores comparing a configuration against fixed
/// reference points and against its smart-max peer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfigScores {
    pub profitability: f64,
    pub production: f64,
    pub utilization: f64,
    pub potential: f64,
}

/// Full lifecycle financial result for one panel configuration.
///
/// Produced fresh per evaluation, never mutated in place. Money amounts
/// are EUR, unit prices snt/kWh, energies kWh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub panels_count: u32,
    pub yearly_energy_dc_kwh: f64,
    pub yearly_energy_ac_kwh: f64,
    pub capacity_kwp: f64,
    pub yearly_carbon_offset_kg: f64,
    pub savings_year1_eur: f64,
    pub installation_cost_eur: f64,
    pub maintenance_cost_per_year_eur: f64,
    pub lifetime_maintenance_cost_eur: f64,
    pub lifetime_energy_ac_kwh: f64,
    pub lifetime_savings_eur: f64,
    pub average_yearly_savings_eur: f64,
    pub lifetime_financing_cost_eur: f64,
    pub inverter_replacement_cost_eur: f64,
    pub lifetime_cost_eur: f64,
    pub lcoe_snt_per_kwh: f64,
    pub payback_years: f64,
    pub net_present_value_eur: f64,
    pub internal_rate_of_return_pct: f64,
    /// `false` when the IRR search did not converge; the 0 % result is a
    /// deliberate fallback in that case, not a computed rate.
    pub irr_converged: bool,
    pub yearly_self_use_energy_ac_kwh: f64,
    pub yearly_excess_energy_ac_kwh: f64,
    pub self_sufficiency_rate_pct: f64,
    pub yearly_savings_rate_pct: f64,
    pub net_cash_flow_per_year_eur: Vec<f64>,
    pub net_cash_flow_cumulative_eur: Vec<f64>,
    pub scores: ConfigScores,
}

/// Evaluation of every selected configuration for one building.
///
/// `target` is absent when even the smallest catalog entry exceeds the
/// usage target; `optimized` is absent when the production profile cannot
/// constrain any month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub technical_max: CalculationResult,
    pub smart_max: CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<CalculationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimized: Option<CalculationResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> CalculationResult {
        CalculationResult {
            panels_count: 10,
            yearly_energy_dc_kwh: 4000.0,
            yearly_energy_ac_kwh: 3740.0,
            capacity_kwp: 4.0,
            yearly_carbon_offset_kg: 374.0,
            savings_year1_eur: 600.0,
            installation_cost_eur: 6000.0,
            maintenance_cost_per_year_eur: 60.0,
            lifetime_maintenance_cost_eur: 1500.0,
            lifetime_energy_ac_kwh: 88000.0,
            lifetime_savings_eur: 16000.0,
            average_yearly_savings_eur: 640.0,
            lifetime_financing_cost_eur: 0.0,
            inverter_replacement_cost_eur: 1200.0,
            lifetime_cost_eur: 8700.0,
            lcoe_snt_per_kwh: 9.89,
            payback_years: 11.1,
            net_present_value_eur: 3500.0,
            internal_rate_of_return_pct: 8.2,
            irr_converged: true,
            yearly_self_use_energy_ac_kwh: 2244.0,
            yearly_excess_energy_ac_kwh: 1496.0,
            self_sufficiency_rate_pct: 44.9,
            yearly_savings_rate_pct: 52.0,
            net_cash_flow_per_year_eur: vec![-6000.0, 540.0],
            net_cash_flow_cumulative_eur: vec![-6000.0, -5460.0],
            scores: ConfigScores {
                profitability: 58.6,
                production: 100.0,
                utilization: 100.0,
                potential: 40.0,
            },
        }
    }

    #[test]
    fn test_report_omits_absent_configurations() {
        let report = SizingReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            technical_max: sample_result(),
            smart_max: sample_result(),
            target: None,
            optimized: None,
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("\"target\""));
        assert!(!json.contains("\"optimized\""));
        assert!(json.contains("\"smart_max\""));
    }

    #[test]
    fn test_result_roundtrip() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let back: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
