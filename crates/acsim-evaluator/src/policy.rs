//! Automated play driven by a [`Strategy`].

use std::sync::Arc;

use acsim_engine::{Action, Crop, DecisionPolicy, Field, Game};
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution as _, weighted::WeightedIndex},
};
use rand_pcg::Pcg32;

use crate::strategy::Strategy;

/// [`DecisionPolicy`] that plays according to a [`Strategy`].
///
/// Owns its own random stream for crop draws so it can run alongside the
/// generator that drives the game's weather.
#[derive(Debug, Clone)]
pub struct StrategyPolicy<'s> {
    strategy: &'s Strategy,
    rng: Pcg32,
}

impl<'s> StrategyPolicy<'s> {
    #[must_use]
    pub fn new(strategy: &'s Strategy, rng: Pcg32) -> Self {
        Self { strategy, rng }
    }

    /// Creates a policy whose random stream is seeded from `rng`.
    pub fn from_rng<R>(strategy: &'s Strategy, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(strategy, Pcg32::seed_from_u64(rng.random()))
    }

    #[must_use]
    pub fn strategy(&self) -> &'s Strategy {
        self.strategy
    }

    /// Whether the strategy wants to buy `field` with `money` in hand.
    #[expect(clippy::cast_precision_loss)]
    fn wants_field(&self, field: &Field, money: i64) -> bool {
        field.price <= money && (field.price as f64) < money as f64 / self.strategy.field_ratio()
    }
}

impl DecisionPolicy for StrategyPolicy<'_> {
    fn decide_action(&mut self, game: &Game<'_>, actions: &[Action]) -> Action {
        let money = game.farm().money();
        if actions.contains(&Action::BuyField)
            && game
                .available_fields()
                .iter()
                .any(|field| self.wants_field(field, money))
        {
            return Action::BuyField;
        }
        if actions.contains(&Action::PlantCrops) {
            return Action::PlantCrops;
        }
        Action::AdvanceToHarvest
    }

    fn decide_field_to_plant(&mut self, _game: &Game<'_>, _fields: &[&Field]) -> usize {
        0
    }

    fn decide_crop_to_plant(&mut self, _game: &Game<'_>, crops: &[&Arc<Crop>]) -> usize {
        let weights = crops
            .iter()
            .map(|crop| self.strategy.weighting(crop.id).unwrap_or(0));
        match WeightedIndex::new(weights) {
            Ok(index) => index.sample(&mut self.rng),
            Err(e) => {
                // Every offered crop is weighted zero; plant the first one.
                tracing::debug!(offered = crops.len(), error = %e, "no weighted crop on offer");
                0
            }
        }
    }

    fn decide_crop_quantity(
        &mut self,
        _game: &Game<'_>,
        _field: &Field,
        _crop: &Crop,
        maximum: u32,
    ) -> u32 {
        maximum
    }

    fn decide_field_to_buy(&mut self, game: &Game<'_>, fields: &[&Field]) -> Option<usize> {
        let money = game.farm().money();
        fields
            .iter()
            .position(|field| self.wants_field(field, money))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use acsim_engine::{Catalog, CropId, FieldId, GameConfig, NullReporter, WeatherGenerator};
    use rand::SeedableRng as _;

    use super::*;

    fn crop(id: u32, cost: i64) -> Crop {
        Crop {
            id: CropId(id),
            name: format!("Crop {id}"),
            description: String::new(),
            cost,
            sale_price: cost * 2,
            ideal_heat: 1.0,
            ideal_wetness: 1.0,
            heat_sensitivity: 0.0,
            wetness_sensitivity: 0.0,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![crop(1, 10), crop(2, 20)],
            vec![
                Field::new(FieldId(1), "Home", "", 10, 1.0, 100),
                Field::new(FieldId(2), "Hill", "", 10, 1.0, 200),
                Field::new(FieldId(3), "Vale", "", 10, 1.0, 150),
            ],
        )
        .unwrap()
    }

    fn config() -> GameConfig {
        GameConfig {
            max_years: 3,
            initial_money: 500,
            weather: WeatherGenerator::new(0.0, 0.0).unwrap(),
        }
    }

    fn strategy(w1: u32, w2: u32, field_ratio: f64) -> Strategy {
        Strategy::new(BTreeMap::from([(CropId(1), w1), (CropId(2), w2)]), field_ratio).unwrap()
    }

    #[test]
    fn test_buys_cheap_field_first() {
        let catalog = catalog();
        let game = Game::new(config(), &catalog).unwrap();
        // 500 / 2.0 = 250: both remaining fields are cheap enough.
        let strategy = strategy(1, 1, 2.0);
        let mut policy = StrategyPolicy::new(&strategy, Pcg32::seed_from_u64(0));
        let actions = game.legal_actions();
        assert_eq!(policy.decide_action(&game, &actions), Action::BuyField);

        let fields = game.available_fields().iter().collect::<Vec<_>>();
        assert_eq!(policy.decide_field_to_buy(&game, &fields), Some(0));
    }

    #[test]
    fn test_high_ratio_plants_instead() {
        let catalog = catalog();
        let game = Game::new(config(), &catalog).unwrap();
        // 500 / 4.0 = 125: nothing is cheap enough.
        let strategy = strategy(1, 1, 4.0);
        let mut policy = StrategyPolicy::new(&strategy, Pcg32::seed_from_u64(0));
        let actions = game.legal_actions();
        assert_eq!(policy.decide_action(&game, &actions), Action::PlantCrops);

        let fields = game.available_fields().iter().collect::<Vec<_>>();
        assert_eq!(policy.decide_field_to_buy(&game, &fields), None);
    }

    #[test]
    fn test_lowest_index_match_is_bought() {
        let catalog = catalog();
        let game = Game::new(config(), &catalog).unwrap();
        // 500 / 3.0 = 166.7: only the 150 field, listed second.
        let strategy = strategy(1, 1, 3.0);
        let mut policy = StrategyPolicy::new(&strategy, Pcg32::seed_from_u64(0));
        let fields = game.available_fields().iter().collect::<Vec<_>>();
        assert_eq!(policy.decide_field_to_buy(&game, &fields), Some(1));
    }

    #[test]
    fn test_advances_when_nothing_to_do() {
        let catalog = catalog();
        let game = Game::new(config(), &catalog).unwrap();
        let strategy = strategy(1, 1, 4.0);
        let mut policy = StrategyPolicy::new(&strategy, Pcg32::seed_from_u64(0));
        let actions = [Action::ReviewStatus, Action::AdvanceToHarvest, Action::Retire];
        assert_eq!(policy.decide_action(&game, &actions), Action::AdvanceToHarvest);
    }

    #[test]
    fn test_crop_draw_follows_weightings() {
        let catalog = catalog();
        let game = Game::new(config(), &catalog).unwrap();
        let crops = catalog.crops().iter().collect::<Vec<_>>();

        let only_second = strategy(0, 5, 1.0);
        let mut policy = StrategyPolicy::new(&only_second, Pcg32::seed_from_u64(0));
        for _ in 0..100 {
            assert_eq!(policy.decide_crop_to_plant(&game, &crops), 1);
        }

        let mostly_first = strategy(9, 1, 1.0);
        let mut policy = StrategyPolicy::new(&mostly_first, Pcg32::seed_from_u64(1));
        let first = (0..1000)
            .filter(|_| policy.decide_crop_to_plant(&game, &crops) == 0)
            .count();
        assert!((850..=950).contains(&first), "{first}");
    }

    #[test]
    fn test_zero_weighted_offer_falls_back_to_first() {
        let catalog = catalog();
        let game = Game::new(config(), &catalog).unwrap();
        let only_second = strategy(0, 5, 1.0);
        let mut policy = StrategyPolicy::new(&only_second, Pcg32::seed_from_u64(0));
        let offered = [&catalog.crops()[0]];
        assert_eq!(policy.decide_crop_to_plant(&game, &offered), 0);
    }

    #[test]
    fn test_plants_maximum_quantity() {
        let catalog = catalog();
        let game = Game::new(config(), &catalog).unwrap();
        let strategy = strategy(1, 1, 1.0);
        let mut policy = StrategyPolicy::new(&strategy, Pcg32::seed_from_u64(0));
        let field = &game.farm().owned_fields()[0];
        assert_eq!(
            policy.decide_crop_quantity(&game, field, &catalog.crops()[0], 7),
            7
        );
    }

    #[test]
    fn test_full_game_terminates() {
        let catalog = catalog();
        let strategy = strategy(3, 1, 1.5);
        let mut game = Game::new(config(), &catalog).unwrap();
        let mut policy = StrategyPolicy::new(&strategy, Pcg32::seed_from_u64(5));
        let mut rng = Pcg32::seed_from_u64(6);
        let score = game.run(&mut policy, &mut NullReporter, &mut rng).unwrap();
        assert!(game.state().is_complete());
        assert!(score > 0);
    }
}
