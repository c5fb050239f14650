use std::sync::Arc;

use super::{Crop, Field, Weather};

/// The player's holdings.
///
/// Owns its fields exclusively and tracks cash plus the current year's
/// spending. `current_year_new_assets` is the part of the expenditure spent on
/// fields; it leaves cash like any other spending but is kept apart so the
/// yearly profit excludes it.
#[derive(Debug, Clone)]
pub struct Farm {
    owned_fields: Vec<Field>,
    money: i64,
    current_year_expenditure: i64,
    current_year_new_assets: i64,
}

impl Farm {
    #[must_use]
    pub fn new(owned_fields: Vec<Field>, money: i64) -> Self {
        Self {
            owned_fields,
            money,
            current_year_expenditure: 0,
            current_year_new_assets: 0,
        }
    }

    #[must_use]
    pub fn money(&self) -> i64 {
        self.money
    }

    #[must_use]
    pub fn owned_fields(&self) -> &[Field] {
        &self.owned_fields
    }

    #[must_use]
    pub fn current_year_expenditure(&self) -> i64 {
        self.current_year_expenditure
    }

    #[must_use]
    pub fn current_year_new_assets(&self) -> i64 {
        self.current_year_new_assets
    }

    /// Indices into [`Farm::owned_fields`] of the fields with nothing planted.
    pub fn empty_field_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.owned_fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_empty())
            .map(|(i, _)| i)
    }

    #[must_use]
    pub fn has_empty_field(&self) -> bool {
        self.owned_fields.iter().any(Field::is_empty)
    }

    /// Plants the owned field at `index` and pays for the seed.
    ///
    /// Returns the total cost.
    pub fn plant(&mut self, index: usize, crop: Arc<Crop>, quantity: u32) -> i64 {
        let cost = crop.cost * i64::from(quantity);
        self.owned_fields[index].plant(crop, quantity);
        self.money -= cost;
        self.current_year_expenditure += cost;
        cost
    }

    /// Takes ownership of a purchased field and pays its price.
    pub fn buy_field(&mut self, field: Field) {
        self.money -= field.price;
        self.current_year_expenditure += field.price;
        self.current_year_new_assets += field.price;
        self.owned_fields.push(field);
    }

    /// Sums the harvest income of every planted field.
    pub fn harvest(&mut self, weather: &Weather) -> i64 {
        self.owned_fields
            .iter_mut()
            .filter(|field| !field.is_empty())
            .map(|field| field.calculate_income(weather))
            .sum()
    }

    /// Books the harvest income and resets the farm for the next year.
    pub fn close_year(&mut self, income: i64) {
        self.money += income;
        self.current_year_expenditure = 0;
        self.current_year_new_assets = 0;
        for field in &mut self.owned_fields {
            field.clear();
        }
    }

    /// Sum of the purchase prices of all owned fields.
    #[must_use]
    pub fn assets(&self) -> i64 {
        self.owned_fields.iter().map(|field| field.price).sum()
    }

    /// Cash plus field purchase prices.
    #[must_use]
    pub fn net_worth(&self) -> i64 {
        self.money + self.assets()
    }
}
