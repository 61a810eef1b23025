use serde::Serialize;

/// Year index (0-based, counting production years) at which the inverter
/// replacement cost falls due, i.e. calendar year 15 of the installation.
const INVERTER_REPLACEMENT_YEAR_INDEX: u32 = 14;

const IRR_INITIAL_RATE: f64 = 0.10;
const IRR_TOLERANCE: f64 = 1e-6;
const IRR_MAX_ITERATIONS: u32 = 100;

/// Net cash flow of an installation over its lifespan, year 0 (the
/// investment) through year N. Both sequences have length `lifespan + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowSeries {
    pub per_year: Vec<f64>,
    pub cumulative: Vec<f64>,
}

/// Internal rate of return in percent, with a flag distinguishing a
/// computed 0 % rate from the non-convergence fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrrOutcome {
    pub percent: f64,
    pub converged: bool,
}

/// Produce the year-by-year net cash-flow series for one installation.
///
/// Year 0 is the negated installation cost. Every production year earns
/// the first-year savings adjusted by the combined price-escalation and
/// efficiency-depreciation factor, minus maintenance; year 15 carries
/// the one-off inverter replacement. All factor arguments are fractions,
/// not percents.
pub fn simulate(
    installation_cost: f64,
    savings_year1: f64,
    maintenance_per_year: f64,
    lifespan_years: u32,
    depreciation: f64,
    cost_increase: f64,
    inverter_replacement: f64,
) -> CashFlowSeries {
    let mut per_year = Vec::with_capacity(lifespan_years as usize + 1);
    let mut cumulative = Vec::with_capacity(lifespan_years as usize + 1);

    per_year.push(-installation_cost);
    let mut running_total = -installation_cost;
    cumulative.push(running_total);

    for i in 0..lifespan_years {
        let mut flow = if i == 0 {
            savings_year1 - maintenance_per_year
        } else {
            let adjusted =
                savings_year1 * (1.0 + cost_increase - depreciation).powi(i as i32 + 1);
            adjusted - maintenance_per_year
        };
        if i == INVERTER_REPLACEMENT_YEAR_INDEX {
            flow -= installation_cost * inverter_replacement;
        }

        per_year.push(flow);
        running_total += flow;
        cumulative.push(running_total);
    }

    CashFlowSeries { per_year, cumulative }
}

/// Internal rate of return of a cash-flow sequence via Newton-Raphson.
///
/// Starts at 10 %, iterates `rate -= npv / npv'` until |npv| is inside
/// tolerance. When the derivative vanishes or the iteration budget runs
/// out, the search is declared non-convergent and resolves to 0 % with
/// `converged = false` -- a deliberate fallback, not an error.
pub fn internal_rate_of_return(cash_flows: &[f64]) -> IrrOutcome {
    let mut rate = IRR_INITIAL_RATE;

    for _ in 0..IRR_MAX_ITERATIONS {
        let mut npv = 0.0;
        let mut dnpv = 0.0;
        for (year, flow) in cash_flows.iter().enumerate() {
            let discount = (1.0 + rate).powi(year as i32);
            npv += flow / discount;
            dnpv -= year as f64 * flow / (discount * (1.0 + rate));
        }

        if npv.abs() < IRR_TOLERANCE {
            return IrrOutcome {
                percent: rate * 100.0,
                converged: true,
            };
        }
        if dnpv.abs() < IRR_TOLERANCE {
            break;
        }

        rate -= npv / dnpv;
    }

    IrrOutcome {
        percent: 0.0,
        converged: false,
    }
}
