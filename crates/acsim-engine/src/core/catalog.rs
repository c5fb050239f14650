use std::{collections::HashSet, sync::Arc};

use crate::GameError;

use super::{Crop, Field};

/// Validated, read-only set of crop and field definitions.
///
/// Shared by reference across every simulated game. Crops are reference
/// counted so plantings can point at them without copying; fields are cloned
/// into each game because they carry per-year state.
#[derive(Debug, Clone)]
pub struct Catalog {
    crops: Vec<Arc<Crop>>,
    fields: Vec<Field>,
}

impl Catalog {
    /// Builds a catalog, failing fast on definitions the game cannot run with.
    ///
    /// Both lists must be non-empty, crop ids and names must be unique, every
    /// crop must cost a positive amount and every field must hold at least one
    /// unit. Field order is preserved: the first field is the one every game
    /// starts with.
    pub fn new(crops: Vec<Crop>, fields: Vec<Field>) -> Result<Self, GameError> {
        if crops.is_empty() {
            return Err(GameError::InvalidConfiguration {
                reason: "the crop catalog is empty",
            });
        }
        if fields.is_empty() {
            return Err(GameError::InvalidConfiguration {
                reason: "the field catalog is empty",
            });
        }
        let mut ids = HashSet::new();
        if !crops.iter().all(|crop| ids.insert(crop.id)) {
            return Err(GameError::InvalidConfiguration {
                reason: "crop ids must be unique",
            });
        }
        let mut names = HashSet::new();
        if !crops.iter().all(|crop| names.insert(crop.name.as_str())) {
            return Err(GameError::InvalidConfiguration {
                reason: "crop names must be unique",
            });
        }
        if crops.iter().any(|crop| crop.cost <= 0) {
            return Err(GameError::InvalidConfiguration {
                reason: "crop costs must be positive",
            });
        }
        if fields.iter().any(|field| field.max_crop_quantity == 0) {
            return Err(GameError::InvalidConfiguration {
                reason: "field capacities must be positive",
            });
        }
        let fields = fields
            .into_iter()
            .map(|mut field| {
                field.clear();
                field
            })
            .collect();
        Ok(Self {
            crops: crops.into_iter().map(Arc::new).collect(),
            fields,
        })
    }

    #[must_use]
    pub fn crops(&self) -> &[Arc<Crop>] {
        &self.crops
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn lowest_crop_cost(&self) -> i64 {
        self.crops.iter().map(|crop| crop.cost).min().unwrap_or(0)
    }
}
