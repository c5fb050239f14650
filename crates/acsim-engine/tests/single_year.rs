//! A one-year game with a single perfectly tolerant crop.

use std::sync::Arc;

use acsim_engine::{
    Action, Catalog, Crop, CropId, DecisionPolicy, Field, FieldId, Game, GameConfig, GameState,
    GameReporter, WeatherGenerator, YearFinancials,
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

const SOIL_QUALITY: f64 = 1.3;
const STARTING_FIELD_PRICE: i64 = 250;

struct PlantTenThenHarvest {
    planted: bool,
}

impl DecisionPolicy for PlantTenThenHarvest {
    fn decide_action(&mut self, _game: &Game<'_>, actions: &[Action]) -> Action {
        if !self.planted && actions.contains(&Action::PlantCrops) {
            self.planted = true;
            Action::PlantCrops
        } else {
            Action::AdvanceToHarvest
        }
    }

    fn decide_field_to_plant(&mut self, _game: &Game<'_>, _fields: &[&Field]) -> usize {
        0
    }

    fn decide_crop_to_plant(&mut self, _game: &Game<'_>, _crops: &[&Arc<Crop>]) -> usize {
        0
    }

    fn decide_crop_quantity(
        &mut self,
        _game: &Game<'_>,
        _field: &Field,
        _crop: &Crop,
        maximum: u32,
    ) -> u32 {
        assert!(maximum >= 10);
        10
    }

    fn decide_field_to_buy(&mut self, _game: &Game<'_>, _fields: &[&Field]) -> Option<usize> {
        None
    }
}

#[derive(Default)]
struct Financials(Vec<YearFinancials>);

impl GameReporter for Financials {
    fn financials(&mut self, financials: &YearFinancials) {
        self.0.push(*financials);
    }
}

fn catalog() -> Catalog {
    let crop = Crop {
        id: CropId(1),
        name: "Turnip".to_owned(),
        description: "Grows anywhere".to_owned(),
        cost: 10,
        sale_price: 20,
        ideal_heat: 1.0,
        ideal_wetness: 1.0,
        heat_sensitivity: 0.0,
        wetness_sensitivity: 0.0,
    };
    let field = Field::new(
        FieldId(1),
        "Home",
        "The family plot",
        100,
        SOIL_QUALITY,
        STARTING_FIELD_PRICE,
    );
    Catalog::new(vec![crop], vec![field]).unwrap()
}

#[test]
#[expect(clippy::cast_possible_truncation)]
fn test_single_year_income_and_score() {
    let catalog = catalog();
    let config = GameConfig {
        max_years: 1,
        initial_money: 500,
        weather: WeatherGenerator::default(),
    };
    let mut game = Game::new(config, &catalog).unwrap();
    let mut policy = PlantTenThenHarvest { planted: false };
    let mut reporter = Financials::default();
    let mut rng = Pcg32::seed_from_u64(42);

    let score = game.run(&mut policy, &mut reporter, &mut rng).unwrap();

    let expected_income = (1.0 * 10.0 * 20.0 * SOIL_QUALITY).floor() as i64;
    assert_eq!(reporter.0.len(), 1);
    assert_eq!(reporter.0[0].income, expected_income);
    assert_eq!(reporter.0[0].expenditure, 100);
    assert_eq!(game.state(), GameState::Complete);
    assert_eq!(game.farm().money(), 500 - 100 + expected_income);
    assert_eq!(score, game.farm().money() + STARTING_FIELD_PRICE);
}
