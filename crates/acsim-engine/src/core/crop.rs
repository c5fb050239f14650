use serde::{Deserialize, Serialize};

/// Catalog identifier of a crop.
///
/// Identifiers are also used by crossover, which inherits odd-identifier
/// weightings from one parent and even-identifier weightings from the other.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct CropId(pub u32);

impl CropId {
    #[must_use]
    pub const fn is_odd(self) -> bool {
        self.0 % 2 == 1
    }
}

/// A plantable crop.
///
/// Crops are immutable once loaded. `cost` is paid per planted unit and
/// `sale_price` is earned per harvested unit, scaled by the yield fraction
/// computed from the year's weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub id: CropId,
    pub name: String,
    pub description: String,
    pub cost: i64,
    pub sale_price: i64,
    pub ideal_heat: f64,
    pub ideal_wetness: f64,
    pub heat_sensitivity: f64,
    pub wetness_sensitivity: f64,
}

impl Crop {
    /// Fraction of the ideal harvest achieved under the given weather.
    ///
    /// Equals 1.0 when the weather hits the crop's ideal heat and wetness, and
    /// decreases linearly with the distance from the ideal. The value is not
    /// clamped: a negative fraction represents a failed harvest that costs
    /// money.
    #[must_use]
    pub fn yield_fraction(&self, heat: f64, wetness: f64) -> f64 {
        1.0 - (heat - self.ideal_heat).abs() * self.heat_sensitivity
            - (wetness - self.ideal_wetness).abs() * self.wetness_sensitivity
    }
}
