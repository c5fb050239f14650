//! Strategy genome: crop weightings and field-buying aggressiveness.
//!
//! A [`Strategy`] stores one positive integer weighting per catalog crop and a
//! `field_ratio`. The planting probabilities are derived from the weightings
//! (normalized to sum to 1) and recomputed whenever a weighting changes, so
//! they can never drift out of sync with the genome.
//!
//! The field ratio is how many times a field's price the farm must hold in
//! cash before the automated policy buys it. Larger ratios buy later.

use std::{collections::BTreeMap, fmt, sync::Arc};

use acsim_engine::{Catalog, Crop, CropId};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StrategyError {
    #[display("crop weightings sum to zero")]
    DegenerateStrategy,
    #[display("crop {crop} is not in the catalog")]
    UnknownCrop { crop: CropId },
    #[display("no weighting for catalog crop {crop}")]
    MissingCrop { crop: CropId },
}

/// An evolvable decision policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    crop_weightings: BTreeMap<CropId, u32>,
    field_ratio: f64,
    chances_to_plant: BTreeMap<CropId, f64>,
}

impl Strategy {
    /// Creates a strategy from raw weightings.
    ///
    /// Fails with [`StrategyError::DegenerateStrategy`] if the weightings sum
    /// to zero (including when there are none).
    pub fn new(
        crop_weightings: BTreeMap<CropId, u32>,
        field_ratio: f64,
    ) -> Result<Self, StrategyError> {
        let chances_to_plant = chances_from_weightings(&crop_weightings)?;
        Ok(Self {
            crop_weightings,
            field_ratio,
            chances_to_plant,
        })
    }

    /// Creates a strategy whose weightings cover exactly the catalog's crops.
    pub fn for_catalog(
        catalog: &Catalog,
        crop_weightings: BTreeMap<CropId, u32>,
        field_ratio: f64,
    ) -> Result<Self, StrategyError> {
        if let Some(crop) = catalog
            .crops()
            .iter()
            .find(|crop| !crop_weightings.contains_key(&crop.id))
        {
            return Err(StrategyError::MissingCrop { crop: crop.id });
        }
        if let Some(&crop) = crop_weightings
            .keys()
            .find(|id| catalog.crops().iter().all(|crop| crop.id != **id))
        {
            return Err(StrategyError::UnknownCrop { crop });
        }
        Self::new(crop_weightings, field_ratio)
    }

    #[must_use]
    pub fn crop_weightings(&self) -> &BTreeMap<CropId, u32> {
        &self.crop_weightings
    }

    #[must_use]
    pub fn weighting(&self, crop: CropId) -> Option<u32> {
        self.crop_weightings.get(&crop).copied()
    }

    #[must_use]
    pub fn field_ratio(&self) -> f64 {
        self.field_ratio
    }

    /// Shifts the field ratio by `delta`. No clamping is applied.
    pub fn adjust_field_ratio(&mut self, delta: f64) {
        self.field_ratio += delta;
    }

    /// Planting probability per crop; the values sum to 1.
    #[must_use]
    pub fn chances_to_plant(&self) -> &BTreeMap<CropId, f64> {
        &self.chances_to_plant
    }

    #[must_use]
    pub fn chance_to_plant(&self, crop: CropId) -> Option<f64> {
        self.chances_to_plant.get(&crop).copied()
    }

    /// Replaces the weighting of one crop and recomputes the probabilities.
    ///
    /// On error the strategy is left unchanged.
    pub fn replace_weighting(&mut self, crop: CropId, weighting: u32) -> Result<(), StrategyError> {
        let Some(slot) = self.crop_weightings.get_mut(&crop) else {
            return Err(StrategyError::UnknownCrop { crop });
        };
        let previous = std::mem::replace(slot, weighting);
        match chances_from_weightings(&self.crop_weightings) {
            Ok(chances) => {
                self.chances_to_plant = chances;
                Ok(())
            }
            Err(e) => {
                self.crop_weightings.insert(crop, previous);
                Err(e)
            }
        }
    }

    /// Planting chances paired with their crops, most likely first.
    ///
    /// Crops without a weighting are skipped.
    #[must_use]
    pub fn ranked_chances<'c>(&self, crops: &'c [Arc<Crop>]) -> Vec<CropChance<'c>> {
        let mut chances = crops
            .iter()
            .filter_map(|crop| {
                self.chance_to_plant(crop.id)
                    .map(|chance| CropChance { crop, chance })
            })
            .collect::<Vec<_>>();
        chances.sort_by(|a, b| b.chance.total_cmp(&a.chance));
        chances
    }

    /// A printable summary naming crops from `crops`.
    #[must_use]
    pub fn describe<'s, 'c>(&'s self, crops: &'c [Arc<Crop>]) -> StrategyDescription<'s, 'c> {
        StrategyDescription {
            strategy: self,
            chances: self.ranked_chances(crops),
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn chances_from_weightings(
    weightings: &BTreeMap<CropId, u32>,
) -> Result<BTreeMap<CropId, f64>, StrategyError> {
    let total = weightings.values().map(|&w| u64::from(w)).sum::<u64>();
    if total == 0 {
        return Err(StrategyError::DegenerateStrategy);
    }
    Ok(weightings
        .iter()
        .map(|(&crop, &w)| (crop, f64::from(w) / total as f64))
        .collect())
}

/// A crop together with its probability of being planted.
#[derive(Debug, Clone, Copy)]
pub struct CropChance<'a> {
    pub crop: &'a Crop,
    pub chance: f64,
}

impl fmt::Display for CropChance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.1}%", self.crop.name, self.chance * 100.0)
    }
}

/// Display adapter returned by [`Strategy::describe`].
#[derive(Debug)]
pub struct StrategyDescription<'s, 'c> {
    strategy: &'s Strategy,
    chances: Vec<CropChance<'c>>,
}

impl fmt::Display for StrategyDescription<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field ratio {:.3}", self.strategy.field_ratio)?;
        for chance in &self.chances {
            write!(f, ", {chance}")?;
        }
        Ok(())
    }
}
