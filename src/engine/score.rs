use crate::domain::{BuildingContext, ConfigScores, DerivedPanelConfig};

/// IRR treated as the "excellent" ceiling, on the percent scale.
const PROFITABILITY_IRR_CEILING_PCT: f64 = 14.0;
/// AC yield per panel scoring 0 (and below).
const PRODUCTION_FLOOR_KWH_PER_PANEL: f64 = 200.0;
/// AC yield per panel scoring 100 (and above).
const PRODUCTION_CEILING_KWH_PER_PANEL: f64 = 350.0;

/// Cross-configuration reference values consulted during scoring.
///
/// The smart-max yield is passed in explicitly; score computation never
/// reaches for ambient shared state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerContext {
    pub smart_max_ac_kwh: f64,
}

/// Normalize one configuration's evaluator outputs into 0-100 scores.
pub fn score(
    config: &DerivedPanelConfig,
    irr_percent: f64,
    building: &BuildingContext,
    peer: &PeerContext,
) -> ConfigScores {
    ConfigScores {
        profitability: profitability(irr_percent),
        production: production(config.yearly_energy_ac_kwh, config.panels_count),
        utilization: utilization(config.yearly_energy_ac_kwh, peer.smart_max_ac_kwh),
        potential: potential(
            config.panels_count,
            building.panel_area_m2,
            building.usable_roof_area_m2,
        ),
    }
}

fn profitability(irr_percent: f64) -> f64 {
    (irr_percent / PROFITABILITY_IRR_CEILING_PCT * 100.0).clamp(0.0, 100.0)
}

fn production(yearly_energy_ac_kwh: f64, panels_count: u32) -> f64 {
    if panels_count == 0 {
        return 0.0;
    }
    let per_panel = yearly_energy_ac_kwh / panels_count as f64;
    let span = PRODUCTION_CEILING_KWH_PER_PANEL - PRODUCTION_FLOOR_KWH_PER_PANEL;
    ((per_panel - PRODUCTION_FLOOR_KWH_PER_PANEL) / span * 100.0).clamp(0.0, 100.0)
}

fn utilization(yearly_energy_ac_kwh: f64, smart_max_ac_kwh: f64) -> f64 {
    if smart_max_ac_kwh <= 0.0 {
        return 0.0;
    }
    (yearly_energy_ac_kwh / smart_max_ac_kwh * 100.0).min(100.0)
}

fn potential(panels_count: u32, panel_area_m2: f64, usable_roof_area_m2: f64) -> f64 {
    if usable_roof_area_m2 <= 0.0 {
        return 0.0;
    }
    (panels_count as f64 * panel_area_m2 / (usable_roof_area_m2 / 2.0) * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MonthlyProfile;
    use rstest::rstest;

    fn building(usable_roof_area_m2: f64, panel_area_m2: f64) -> BuildingContext {
        BuildingContext {
            annual_energy_usage_kwh: 5000.0,
            load_profile: MonthlyProfile::flat(),
            production_profile: MonthlyProfile::flat(),
            usable_roof_area_m2,
            panel_area_m2,
        }
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(7.0, 50.0)]
    #[case(14.0, 100.0)]
    #[case(20.0, 100.0)]
    #[case(-3.0, 0.0)]
    fn test_profitability_scale(#[case] irr: f64, #[case] expected: f64) {
        assert!((profitability(irr) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(200.0, 0.0)]
    #[case(275.0, 50.0)]
    #[case(350.0, 100.0)]
    #[case(500.0, 100.0)]
    #[case(120.0, 0.0)]
    fn test_production_is_piecewise_linear_per_panel(
        #[case] per_panel: f64,
        #[case] expected: f64,
    ) {
        let score = production(per_panel * 10.0, 10);
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_production_zero_panels() {
        assert_eq!(production(0.0, 0), 0.0);
    }

    #[test]
    fn test_utilization_caps_above_peer() {
        assert!((utilization(2000.0, 4000.0) - 50.0).abs() < 1e-9);
        assert_eq!(utilization(5000.0, 4000.0), 100.0);
        assert_eq!(utilization(2000.0, 0.0), 0.0);
    }

    #[test]
    fn test_potential_uses_half_roof_reference() {
        // 10 panels * 2 m2 against 60 m2 / 2 = 66.7 %
        assert!((potential(10, 2.0, 60.0) - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(potential(40, 2.0, 60.0), 100.0);
        assert_eq!(potential(10, 2.0, 0.0), 0.0);
    }

    #[test]
    fn test_score_assembles_all_dimensions() {
        let config = DerivedPanelConfig {
            panels_count: 10,
            yearly_energy_dc_kwh: 3600.0,
            yearly_energy_ac_kwh: 3500.0,
            gain_per_panel: None,
        };
        let scores = score(
            &config,
            7.0,
            &building(60.0, 2.0),
            &PeerContext { smart_max_ac_kwh: 3500.0 },
        );

        assert!((scores.profitability - 50.0).abs() < 1e-9);
        assert!((scores.production - 100.0).abs() < 1e-9);
        assert!((scores.utilization - 100.0).abs() < 1e-9);
        assert!((scores.potential - 200.0 / 3.0).abs() < 1e-9);
    }
}
