use serde::{Deserialize, Serialize};

/// Raw panel-count candidate as delivered by the roof insight provider.
/// One entry per achievable panel count on the modeled roof.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub panels_count: u32,
    pub yearly_energy_dc_kwh: f64,
}

/// Catalog entry with derived quantities: the AC-adjusted yield and the
/// marginal DC yield contributed per panel added since the previous entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPanelConfig {
    pub panels_count: u32,
    pub yearly_energy_dc_kwh: f64,
    /// DC yield scaled by the DC->AC derate and the tilt-boost factor.
    pub yearly_energy_ac_kwh: f64,
    /// `None` for the first (smallest) catalog entry.
    pub gain_per_panel: Option<f64>,
}
