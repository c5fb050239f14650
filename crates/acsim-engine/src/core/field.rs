use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Crop, Weather};

/// Catalog identifier of a field.
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
pub struct FieldId(pub u32);

/// Crop currently growing in a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Planting {
    crop: Arc<Crop>,
    quantity: u32,
}

impl Planting {
    #[must_use]
    pub fn crop(&self) -> &Arc<Crop> {
        &self.crop
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// An ownable land parcel.
///
/// The static part (identifier, capacity, soil quality, price) comes from the
/// catalog. The per-year part is either empty or holds exactly one
/// [`Planting`]:
///
/// ```text
/// empty --plant()--> planted --calculate_income()--> planted --clear()--> empty
/// ```
///
/// Per-year state is never deserialized; catalog fields always start empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub description: String,
    pub max_crop_quantity: u32,
    pub soil_quality: f64,
    pub price: i64,
    #[serde(skip)]
    planting: Option<Planting>,
    #[serde(skip)]
    last_revenue: i64,
}

impl Field {
    #[must_use]
    pub fn new(
        id: FieldId,
        name: impl Into<String>,
        description: impl Into<String>,
        max_crop_quantity: u32,
        soil_quality: f64,
        price: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            max_crop_quantity,
            soil_quality,
            price,
            planting: None,
            last_revenue: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planting.is_none()
    }

    #[must_use]
    pub fn planting(&self) -> Option<&Planting> {
        self.planting.as_ref()
    }

    /// Revenue computed by the last call to [`Field::calculate_income`].
    #[must_use]
    pub fn last_revenue(&self) -> i64 {
        self.last_revenue
    }

    /// Puts `quantity` units of `crop` in the field, replacing any planting.
    ///
    /// Capacity and affordability are checked by the caller.
    pub fn plant(&mut self, crop: Arc<Crop>, quantity: u32) {
        self.planting = Some(Planting { crop, quantity });
    }

    /// Returns the field to the empty state and forgets the last revenue.
    pub fn clear(&mut self) {
        self.planting = None;
        self.last_revenue = 0;
    }

    /// Computes this year's harvest income and stores it as the last revenue.
    ///
    /// ```text
    /// income = floor(yield_fraction * quantity * sale_price * soil_quality)
    /// ```
    ///
    /// The result is negative when the yield fraction is negative. An empty
    /// field earns nothing.
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn calculate_income(&mut self, weather: &Weather) -> i64 {
        let income = match &self.planting {
            Some(Planting { crop, quantity }) => {
                let fraction = crop.yield_fraction(weather.heat, weather.wetness);
                (fraction * f64::from(*quantity) * crop.sale_price as f64 * self.soil_quality)
                    .floor() as i64
            }
            None => 0,
        };
        self.last_revenue = income;
        income
    }
}
