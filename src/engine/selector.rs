use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use crate::domain::{BuildingContext, DerivedPanelConfig};

/// Tuning knobs for the smart-max knee detector.
///
/// Phase 1 looks for a relative collapse of the marginal gain inside the
/// `[range_start, range_end]` corridor; phase 2 falls back to an absolute
/// gain floor. Values are in kWh of DC yield per added panel except the
/// threshold, which is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartMaxThresholds {
    pub range_start: f64,
    pub range_end: f64,
    pub relative_threshold_pct: f64,
    pub fallback_absolute_threshold: f64,
}

impl Default for SmartMaxThresholds {
    fn default() -> Self {
        Self {
            range_start: 200.0,
            range_end: 450.0,
            relative_threshold_pct: 20.0,
            fallback_absolute_threshold: 320.0,
        }
    }
}

/// Highest-panel-count configuration: all modeled usable roof area,
/// irrespective of economics.
pub fn technical_max(catalog: &Catalog) -> &DerivedPanelConfig {
    catalog.last()
}

/// Panel count just before the marginal yield per added panel collapses.
///
/// Marginal yield declines as usable roof area saturates; the smart
/// ceiling is the entry just before that decline becomes severe. Phase 1
/// detects a relative drop between consecutive gains inside the expected
/// corridor; phase 2 falls back to the first gain under an absolute
/// floor. With no collapse at all, the technical max is also the smart
/// max.
pub fn smart_max<'a>(
    catalog: &'a Catalog,
    thresholds: &SmartMaxThresholds,
) -> &'a DerivedPanelConfig {
    // Phase 1: relative collapse inside the gain corridor.
    for (prev, curr) in catalog.entries().iter().tuple_windows() {
        let (Some(prev_gain), Some(curr_gain)) = (prev.gain_per_panel, curr.gain_per_panel)
        else {
            continue;
        };
        if curr_gain < thresholds.range_start || curr_gain > thresholds.range_end {
            continue;
        }
        if prev_gain <= 0.0 {
            continue;
        }
        let drop_ratio = (prev_gain - curr_gain) / prev_gain;
        if drop_ratio >= thresholds.relative_threshold_pct / 100.0 {
            tracing::debug!(
                panels = prev.panels_count,
                drop_ratio,
                "smart max: relative gain collapse detected"
            );
            return prev;
        }
    }

    // Phase 2: absolute gain floor.
    for (prev, curr) in catalog.entries().iter().tuple_windows() {
        if let Some(gain) = curr.gain_per_panel {
            if gain < thresholds.fallback_absolute_threshold {
                tracing::debug!(
                    panels = prev.panels_count,
                    gain,
                    "smart max: gain fell under absolute floor"
                );
                return prev;
            }
        }
    }

    catalog.last()
}

/// Largest configuration whose AC yield stays at or under the yearly
/// usage target. Returns `None` when even the smallest entry overshoots.
pub fn target(catalog: &Catalog, target_annual_usage_kwh: f64) -> Option<&DerivedPanelConfig> {
    let mut best_under: Option<&DerivedPanelConfig> = None;
    let mut closest_diff = f64::INFINITY;

    for entry in catalog.entries() {
        if entry.yearly_energy_ac_kwh <= target_annual_usage_kwh {
            let diff = target_annual_usage_kwh - entry.yearly_energy_ac_kwh;
            if diff < closest_diff {
                closest_diff = diff;
                best_under = Some(entry);
            }
        } else if best_under.is_some() {
            // Crossed the target on a monotonic catalog: the best match
            // is final.
            break;
        }
    }

    best_under
}

/// Configuration sized to the seasonal bottleneck month.
///
/// For each month the annual yield that would make that month's
/// production cover that month's consumption is
/// `load_share * annual_usage / production_share`; the bottleneck month
/// is the one needing the least, i.e. where usage share most exceeds
/// production share. The bottleneck yield scaled by the daily-max
/// utilization factor becomes the target, matched to the nearest catalog
/// entry by absolute difference. Returns `None` when no month has a
/// positive production share.
pub fn optimized<'a>(
    catalog: &'a Catalog,
    building: &BuildingContext,
    daily_max_utilization_factor: f64,
) -> Option<&'a DerivedPanelConfig> {
    let load = building.load_profile.shares();
    let production = building.production_profile.shares();

    let mut bottleneck_yield: Option<f64> = None;
    for month in 0..12 {
        if production[month] <= 0.0 {
            continue;
        }
        let required = load[month] * building.annual_energy_usage_kwh / production[month];
        bottleneck_yield = Some(match bottleneck_yield {
            Some(best) if best <= required => best,
            _ => required,
        });
    }

    let target_yield = bottleneck_yield? * daily_max_utilization_factor;
    catalog.entries().iter().min_by(|a, b| {
        let da = (a.yearly_energy_ac_kwh - target_yield).abs();
        let db = (b.yearly_energy_ac_kwh - target_yield).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}
