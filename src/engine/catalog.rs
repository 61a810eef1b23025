use serde::Serialize;

use super::error::EngineError;
use crate::domain::{DerivedPanelConfig, FinancialParameters, PanelConfig};

/// Derived panel-configuration catalog, strictly ascending by panel count.
///
/// Constructed once per evaluation via [`build`]; the non-empty and
/// strictly-ascending invariants are established there and hold for the
/// catalog's whole lifetime, so selectors can index freely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog(Vec<DerivedPanelConfig>);

impl Catalog {
    pub fn entries(&self) -> &[DerivedPanelConfig] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> &DerivedPanelConfig {
        &self.0[0]
    }

    pub fn last(&self) -> &DerivedPanelConfig {
        &self.0[self.0.len() - 1]
    }
}

/// Normalize the raw candidate list into a derived catalog: sort ascending
/// by panel count, attach the AC-adjusted yield, and compute the marginal
/// DC yield per added panel relative to the previous entry.
pub fn build(raw: &[PanelConfig], financial: &FinancialParameters) -> Result<Catalog, EngineError> {
    if raw.is_empty() {
        return Err(EngineError::InvalidInput(
            "panel configuration catalog is empty".to_string(),
        ));
    }
    if let Some(bad) = raw
        .iter()
        .find(|c| !c.yearly_energy_dc_kwh.is_finite() || c.yearly_energy_dc_kwh < 0.0)
    {
        return Err(EngineError::InvalidInput(format!(
            "yearly DC yield must be finite and non-negative, got {} for {} panels",
            bad.yearly_energy_dc_kwh, bad.panels_count
        )));
    }

    let mut sorted: Vec<PanelConfig> = raw.to_vec();
    sorted.sort_by_key(|c| c.panels_count);

    if let Some(dup) = sorted.windows(2).find(|w| w[0].panels_count == w[1].panels_count) {
        return Err(EngineError::InvalidInput(format!(
            "duplicate catalog entry for {} panels",
            dup[0].panels_count
        )));
    }

    let ac_factor = financial.ac_conversion_factor();
    let derived = sorted
        .iter()
        .enumerate()
        .map(|(i, config)| {
            let gain_per_panel = (i > 0).then(|| {
                let prev = &sorted[i - 1];
                let panel_diff = (config.panels_count - prev.panels_count) as f64;
                (config.yearly_energy_dc_kwh - prev.yearly_energy_dc_kwh) / panel_diff
            });

            DerivedPanelConfig {
                panels_count: config.panels_count,
                yearly_energy_dc_kwh: config.yearly_energy_dc_kwh,
                yearly_energy_ac_kwh: config.yearly_energy_dc_kwh * ac_factor,
                gain_per_panel,
            }
        })
        .collect();

    Ok(Catalog(derived))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params() -> FinancialParameters {
        FinancialParameters {
            dc_to_ac_derate: 0.85,
            tilt_boost_factor_pct: 10.0,
            ..FinancialParameters::default()
        }
    }

    #[test]
    fn test_build_sorts_by_panel_count() {
        let raw = vec![
            PanelConfig { panels_count: 8, yearly_energy_dc_kwh: 3000.0 },
            PanelConfig { panels_count: 2, yearly_energy_dc_kwh: 900.0 },
            PanelConfig { panels_count: 5, yearly_energy_dc_kwh: 2100.0 },
        ];

        let catalog = build(&raw, &params()).unwrap();
        let counts: Vec<u32> = catalog.entries().iter().map(|c| c.panels_count).collect();
        assert_eq!(counts, vec![2, 5, 8]);
    }

    #[test]
    fn test_gain_per_panel_derivation() {
        let raw = vec![
            PanelConfig { panels_count: 2, yearly_energy_dc_kwh: 900.0 },
            PanelConfig { panels_count: 5, yearly_energy_dc_kwh: 2100.0 },
            PanelConfig { panels_count: 6, yearly_energy_dc_kwh: 2400.0 },
        ];

        let catalog = build(&raw, &params()).unwrap();
        let entries = catalog.entries();

        assert!(entries[0].gain_per_panel.is_none());
        // (2100 - 900) / (5 - 2) = 400
        assert!((entries[1].gain_per_panel.unwrap() - 400.0).abs() < 1e-9);
        // (2400 - 2100) / 1 = 300
        assert!((entries[2].gain_per_panel.unwrap() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_ac_yield_applies_derate_and_tilt_boost() {
        let raw = vec![PanelConfig { panels_count: 4, yearly_energy_dc_kwh: 2000.0 }];

        let catalog = build(&raw, &params()).unwrap();
        // 2000 * 0.85 * 1.10 = 1870
        assert!((catalog.first().yearly_energy_ac_kwh - 1870.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = build(&[], &params()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_duplicate_panel_counts_are_rejected() {
        let raw = vec![
            PanelConfig { panels_count: 3, yearly_energy_dc_kwh: 1200.0 },
            PanelConfig { panels_count: 3, yearly_energy_dc_kwh: 1250.0 },
        ];

        let err = build(&raw, &params()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_negative_yield_is_rejected() {
        let raw = vec![PanelConfig { panels_count: 3, yearly_energy_dc_kwh: -1.0 }];

        let err = build(&raw, &params()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    proptest! {
        #[test]
        fn prop_catalog_is_strictly_ascending(
            counts in prop::collection::btree_set(1u32..500, 1..40),
            yields in prop::collection::vec(0.0f64..50_000.0, 40),
        ) {
            let raw: Vec<PanelConfig> = counts
                .iter()
                .zip(yields.iter())
                .map(|(&panels_count, &yearly_energy_dc_kwh)| PanelConfig {
                    panels_count,
                    yearly_energy_dc_kwh,
                })
                .collect();

            let catalog = build(&raw, &params()).unwrap();
            let entries = catalog.entries();

            for pair in entries.windows(2) {
                prop_assert!(pair[1].panels_count > pair[0].panels_count);
            }
            for (i, entry) in entries.iter().enumerate() {
                prop_assert_eq!(entry.gain_per_panel.is_some(), i > 0);
            }
        }
    }
}
