use std::collections::BTreeMap;

use acsim_engine::Catalog;
use acsim_evaluator::strategy::Strategy;
use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An evolved strategy as stored on disk.
///
/// Weightings are keyed by crop name so the file stays readable and survives
/// renumbering of the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StrategyModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub fitness: f64,
    pub field_ratio: f64,
    pub crop_weightings: BTreeMap<String, u32>,
}

impl StrategyModel {
    pub fn from_strategy(
        name: impl Into<String>,
        fitness: f64,
        strategy: &Strategy,
        catalog: &Catalog,
    ) -> Self {
        let crop_weightings = catalog
            .crops()
            .iter()
            .filter_map(|crop| {
                strategy
                    .weighting(crop.id)
                    .map(|weighting| (crop.name.clone(), weighting))
            })
            .collect();
        Self {
            name: name.into(),
            trained_at: Utc::now(),
            fitness,
            field_ratio: strategy.field_ratio(),
            crop_weightings,
        }
    }

    /// Rebuilds the strategy against `catalog`, which must name every crop.
    pub fn to_strategy(&self, catalog: &Catalog) -> anyhow::Result<Strategy> {
        let weightings = self
            .crop_weightings
            .iter()
            .map(|(name, &weighting)| {
                let crop = catalog
                    .crops()
                    .iter()
                    .find(|crop| crop.name == *name)
                    .ok_or_else(|| anyhow::anyhow!("Crop {name} in model not found in catalog"))?;
                Ok((crop.id, weighting))
            })
            .collect::<anyhow::Result<_>>()?;
        Strategy::for_catalog(catalog, weightings, self.field_ratio)
            .with_context(|| format!("Model {} does not fit the catalog", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_model_restores_strategy() {
        let catalog = catalog::load(None).unwrap();
        let weightings = catalog
            .crops()
            .iter()
            .zip(1..)
            .map(|(crop, w)| (crop.id, w * 10))
            .collect::<BTreeMap<_, _>>();
        let strategy = Strategy::for_catalog(&catalog, weightings, 2.5).unwrap();

        let model = StrategyModel::from_strategy("best", 1234.5, &strategy, &catalog);
        assert_eq!(model.crop_weightings["Potatoes"], 10);

        let json = serde_json::to_string(&model).unwrap();
        let loaded: StrategyModel = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.to_strategy(&catalog).unwrap(), strategy);
    }

    #[test]
    fn test_unknown_crop_name_is_rejected() {
        let catalog = catalog::load(None).unwrap();
        let mut model = StrategyModel {
            name: "broken".to_owned(),
            trained_at: Utc::now(),
            fitness: 0.0,
            field_ratio: 1.0,
            crop_weightings: catalog
                .crops()
                .iter()
                .map(|crop| (crop.name.clone(), 1))
                .collect(),
        };
        assert!(model.to_strategy(&catalog).is_ok());
        model.crop_weightings.insert("Turnips".to_owned(), 5);
        assert!(model.to_strategy(&catalog).is_err());
    }
}
