use super::cashflow;
use super::error::EngineError;
use super::score::{self, PeerContext};
use crate::domain::{BuildingContext, CalculationResult, DerivedPanelConfig, FinancialParameters};

/// Compute the full lifecycle financial result for one configuration.
///
/// One internally consistent formula set: unit prices stay in snt/kWh,
/// money in EUR, with the /100 conversion applied exactly where a price
/// meets an energy quantity. Lifetime totals use exact geometric closed
/// forms over the retention factor `q = 1 - d` and the combined
/// escalation factor `r = q * (1 + c)`.
pub fn evaluate(
    config: &DerivedPanelConfig,
    financial: &FinancialParameters,
    building: &BuildingContext,
    peer: &PeerContext,
) -> Result<CalculationResult, EngineError> {
    let lifespan = financial.installation_lifespan_years;
    if lifespan == 0 {
        return Err(EngineError::Domain(
            "installation lifespan must be at least one year".to_string(),
        ));
    }

    let capacity_kwp = config.panels_count as f64 * financial.panel_wattage_w / 1000.0;
    if capacity_kwp <= 0.0 {
        return Err(EngineError::Domain(format!(
            "capacity must be positive, got {capacity_kwp} kWp for {} panels",
            config.panels_count
        )));
    }

    let ac_kwh = config.yearly_energy_ac_kwh;
    let total_price_snt = financial.total_energy_price_snt_per_kwh();

    let yearly_carbon_offset_kg = financial.emissions_factor_g_per_kwh * ac_kwh / 1000.0;

    // Year-1 savings blend the self-used share at the retail tariff with
    // the exported share at the excess sale price.
    let savings_year1 = financial.self_use_share() * ac_kwh * total_price_snt / 100.0
        + financial.excess_share() * ac_kwh * financial.excess_sale_price_snt / 100.0;

    let installation_cost = financial.installation_cost_per_kwp_eur * capacity_kwp;
    let maintenance_per_year = installation_cost * financial.maintenance_cost_factor_pct / 100.0;
    let lifetime_maintenance = maintenance_per_year * lifespan as f64;

    let depreciation = financial.efficiency_depreciation_factor_pct / 100.0;
    if depreciation <= 0.0 {
        return Err(EngineError::Domain(format!(
            "efficiency depreciation factor must be positive, got {} %",
            financial.efficiency_depreciation_factor_pct
        )));
    }
    let cost_increase = financial.cost_increase_factor_pct / 100.0;
    let retention = 1.0 - depreciation;
    let escalation = retention * (1.0 + cost_increase);
    if (1.0 - escalation).abs() < f64::EPSILON {
        return Err(EngineError::Domain(
            "combined escalation factor of exactly 1 has no closed-form lifetime sum".to_string(),
        ));
    }

    let lifetime_energy_ac =
        ac_kwh * (1.0 - retention.powi(lifespan as i32)) / depreciation;
    let lifetime_savings =
        savings_year1 * (1.0 - escalation.powi(lifespan as i32)) / (1.0 - escalation);
    let average_yearly_savings = lifetime_savings / lifespan as f64;

    let financing_cost = financing_cost(financial);
    let inverter_replacement_cost =
        installation_cost * financial.inverter_replacement_cost_factor_pct / 100.0;
    let lifetime_cost =
        installation_cost + lifetime_maintenance + financing_cost + inverter_replacement_cost;

    let lcoe_snt_per_kwh = lifetime_cost / lifetime_energy_ac * 100.0;

    let payback_denominator = savings_year1 - maintenance_per_year;
    if payback_denominator <= 0.0 {
        return Err(EngineError::Domain(format!(
            "first-year savings {savings_year1:.2} EUR do not cover maintenance \
             {maintenance_per_year:.2} EUR, payback is undefined"
        )));
    }
    let payback_years = installation_cost / payback_denominator;

    let cash_flows = cashflow::simulate(
        installation_cost,
        savings_year1,
        maintenance_per_year,
        lifespan,
        depreciation,
        cost_increase,
        financial.inverter_replacement_cost_factor_pct / 100.0,
    );
    let irr = cashflow::internal_rate_of_return(&cash_flows.per_year);

    let discount = 1.0 + financial.discount_rate_pct / 100.0;
    let net_present_value =
        (lifetime_savings - lifetime_cost) / discount.powi(lifespan as i32);

    let yearly_self_use = ac_kwh * financial.self_use_share();
    let yearly_excess = ac_kwh * financial.excess_share();
    let self_sufficiency_rate = if building.annual_energy_usage_kwh > 0.0 {
        (yearly_self_use / building.annual_energy_usage_kwh * 100.0).min(100.0)
    } else {
        0.0
    };
    let yearly_bill = building.annual_energy_usage_kwh * total_price_snt / 100.0;
    let yearly_savings_rate = if yearly_bill > 0.0 {
        savings_year1 / yearly_bill * 100.0
    } else {
        0.0
    };

    let scores = score::score(config, irr.percent, building, peer);

    Ok(CalculationResult {
        panels_count: config.panels_count,
        yearly_energy_dc_kwh: config.yearly_energy_dc_kwh,
        yearly_energy_ac_kwh: ac_kwh,
        capacity_kwp,
        yearly_carbon_offset_kg,
        savings_year1_eur: savings_year1,
        installation_cost_eur: installation_cost,
        maintenance_cost_per_year_eur: maintenance_per_year,
        lifetime_maintenance_cost_eur: lifetime_maintenance,
        lifetime_energy_ac_kwh: lifetime_energy_ac,
        lifetime_savings_eur: lifetime_savings,
        average_yearly_savings_eur: average_yearly_savings,
        lifetime_financing_cost_eur: financing_cost,
        inverter_replacement_cost_eur: inverter_replacement_cost,
        lifetime_cost_eur: lifetime_cost,
        lcoe_snt_per_kwh,
        payback_years,
        net_present_value_eur: net_present_value,
        internal_rate_of_return_pct: irr.percent,
        irr_converged: irr.converged,
        yearly_self_use_energy_ac_kwh: yearly_self_use,
        yearly_excess_energy_ac_kwh: yearly_excess,
        self_sufficiency_rate_pct: self_sufficiency_rate,
        yearly_savings_rate_pct: yearly_savings_rate,
        net_cash_flow_per_year_eur: cash_flows.per_year,
        net_cash_flow_cumulative_eur: cash_flows.cumulative,
        scores,
    })
}

/// Total interest over the loan term, averaging the first and last year's
/// interest charge over the declining balance.
fn financing_cost(financial: &FinancialParameters) -> f64 {
    if financial.loan_principal_eur <= 0.0 || financial.loan_duration_years == 0 {
        return 0.0;
    }
    let interest = financial.interest_rate_pct / 100.0;
    let first_year = financial.loan_principal_eur * interest;
    let last_year = financial.loan_principal_eur / financial.loan_duration_years as f64 * interest;
    (first_year + last_year) / 2.0 * financial.loan_duration_years as f64
}
