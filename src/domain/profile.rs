use serde::{Deserialize, Serialize};
use std::fmt;

/// Seasonal distribution over the twelve months of a year, expressed as
/// non-negative fractions (consumption share of the yearly load, or
/// production share of a representative panel's yearly yield).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 12]")]
pub struct MonthlyProfile([f64; 12]);

impl MonthlyProfile {
    pub const MONTHS: usize = 12;

    pub fn new(shares: [f64; 12]) -> Result<Self, InvalidProfile> {
        if let Some(share) = shares.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(InvalidProfile(*share));
        }
        Ok(Self(shares))
    }

    /// Uniform distribution, 1/12 per month.
    pub fn flat() -> Self {
        Self([1.0 / 12.0; 12])
    }

    pub fn shares(&self) -> &[f64; 12] {
        &self.0
    }

    pub fn share(&self, month: usize) -> f64 {
        self.0[month]
    }
}

impl TryFrom<[f64; 12]> for MonthlyProfile {
    type Error = InvalidProfile;

    fn try_from(shares: [f64; 12]) -> Result<Self, Self::Error> {
        Self::new(shares)
    }
}

/// A monthly share was negative or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidProfile(f64);

impl fmt::Display for InvalidProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "monthly profile shares must be finite and non-negative, got {}",
            self.0
        )
    }
}

impl std::error::Error for InvalidProfile {}
