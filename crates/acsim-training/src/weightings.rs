//! Genome operators: random initialization, crossover and mutation.
//!
//! - **Initialization**: [`random`] draws one integer weighting per catalog
//!   crop and [`random_field_ratio`] a field ratio
//! - **Crossover**: [`create_child`] takes odd-identifier crops from the
//!   father and even-identifier crops from the mother, and averages the field
//!   ratios
//! - **Mutation**: [`mutate`] re-rolls one crop weighting and/or shifts the
//!   field ratio
//!
//! # Mutation Coupling
//!
//! Both mutation checks compare the same uniform draw `u` against their rate.
//! With `p_field <= p_crop`, a field mutation therefore only ever happens
//! together with a crop mutation.

use std::{
    collections::{BTreeMap, BTreeSet},
    ops::RangeInclusive,
};

use acsim_engine::{Catalog, CropId};
use acsim_evaluator::strategy::{Strategy, StrategyError};
use rand::{Rng, seq::IndexedRandom as _};

/// Draws a weighting in `range` for every crop of the catalog.
///
/// # Panics
///
/// Panics if `range` is empty.
pub fn random<R>(
    catalog: &Catalog,
    range: &RangeInclusive<u32>,
    rng: &mut R,
) -> BTreeMap<CropId, u32>
where
    R: Rng + ?Sized,
{
    catalog
        .crops()
        .iter()
        .map(|crop| (crop.id, rng.random_range(range.clone())))
        .collect()
}

/// Draws a field ratio uniformly from `range`.
pub fn random_field_ratio<R>(range: &RangeInclusive<f64>, rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    rng.random_range(range.clone())
}

/// Breeds a child from two parents.
///
/// The child owns a fresh weighting map: the father's weighting for crops
/// with an odd identifier, the mother's for even ones. Its field ratio is
/// the mean of both parents'.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use acsim_engine::CropId;
/// use acsim_evaluator::strategy::Strategy;
/// use acsim_training::weightings;
///
/// let father = Strategy::new(BTreeMap::from([(CropId(1), 10), (CropId(2), 20)]), 1.0).unwrap();
/// let mother = Strategy::new(BTreeMap::from([(CropId(1), 30), (CropId(2), 40)]), 2.0).unwrap();
/// let child = weightings::create_child(&father, &mother).unwrap();
/// assert_eq!(child.weighting(CropId(1)), Some(10));
/// assert_eq!(child.weighting(CropId(2)), Some(40));
/// assert_eq!(child.field_ratio(), 1.5);
/// ```
pub fn create_child(father: &Strategy, mother: &Strategy) -> Result<Strategy, StrategyError> {
    let crops = father
        .crop_weightings()
        .keys()
        .chain(mother.crop_weightings().keys())
        .copied()
        .collect::<BTreeSet<_>>();

    let mut weightings = BTreeMap::new();
    for crop in crops {
        let parent = if crop.is_odd() { father } else { mother };
        let weighting = parent
            .weighting(crop)
            .ok_or(StrategyError::MissingCrop { crop })?;
        weightings.insert(crop, weighting);
    }

    let field_ratio = f64::midpoint(father.field_ratio(), mother.field_ratio());
    Strategy::new(weightings, field_ratio)
}

/// Applies the coupled crop/field-ratio mutation to `strategy`.
///
/// One uniform draw `u` decides both: if `u < crop_rate` a randomly chosen
/// crop gets a new weighting from `weighting_range`; if `u < field_rate` the
/// field ratio moves by a uniform delta in `±max_field_ratio_delta`.
///
/// Returns whether anything was mutated.
pub fn mutate<R>(
    strategy: &mut Strategy,
    crop_rate: f64,
    field_rate: f64,
    weighting_range: &RangeInclusive<u32>,
    max_field_ratio_delta: f64,
    rng: &mut R,
) -> Result<bool, StrategyError>
where
    R: Rng + ?Sized,
{
    let u = rng.random::<f64>();
    let mut mutated = false;

    if u < crop_rate {
        let crops = strategy.crop_weightings().keys().copied().collect::<Vec<_>>();
        if let Some(&crop) = crops.choose(rng) {
            let weighting = rng.random_range(weighting_range.clone());
            strategy.replace_weighting(crop, weighting)?;
            mutated = true;
        }
    }

    if u < field_rate && max_field_ratio_delta > 0.0 {
        let delta = rng.random_range(-max_field_ratio_delta..=max_field_ratio_delta);
        strategy.adjust_field_ratio(delta);
        mutated = true;
    }

    Ok(mutated)
}
