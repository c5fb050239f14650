use std::sync::Arc;

use rand::Rng;

use crate::{Catalog, Crop, Farm, Field, GameError, WeatherGenerator};

use super::{Action, DecisionPolicy, GameReporter, YearFinancials};

pub const DEFAULT_MAX_YEARS: u32 = 20;
pub const DEFAULT_INITIAL_MONEY: i64 = 500;

/// Parameters of a single game.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub max_years: u32,
    pub initial_money: i64,
    pub weather: WeatherGenerator,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_years: DEFAULT_MAX_YEARS,
            initial_money: DEFAULT_INITIAL_MONEY,
            weather: WeatherGenerator::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    /// Years remain and the player has not retired.
    Active,
    /// The player retired.
    Exited,
    /// Every configured year has been played.
    Complete,
}

/// One farm played over a fixed number of years.
///
/// A game borrows the shared [`Catalog`] and copies the catalog fields it
/// needs: the first field is given to the farm for free, the rest can be
/// bought. Nothing in the catalog is ever mutated, so any number of games can
/// run against it at once.
///
/// # Example
///
/// ```
/// use acsim_engine::{Catalog, Crop, CropId, Field, FieldId, Game, GameConfig};
///
/// let crop = Crop {
///     id: CropId(1),
///     name: "Wheat".to_owned(),
///     description: String::new(),
///     cost: 10,
///     sale_price: 20,
///     ideal_heat: 1.0,
///     ideal_wetness: 1.0,
///     heat_sensitivity: 1.0,
///     wetness_sensitivity: 1.0,
/// };
/// let field = Field::new(FieldId(1), "Home", "", 25, 1.0, 100);
/// let catalog = Catalog::new(vec![crop], vec![field]).unwrap();
///
/// let game = Game::new(GameConfig::default(), &catalog).unwrap();
/// assert_eq!(game.farm().owned_fields().len(), 1);
/// assert_eq!(game.final_score(), 500 + 100);
/// ```
#[derive(Debug, Clone)]
pub struct Game<'a> {
    config: GameConfig,
    catalog: &'a Catalog,
    available_fields: Vec<Field>,
    farm: Farm,
    year: u32,
    state: GameState,
}

impl<'a> Game<'a> {
    pub fn new(config: GameConfig, catalog: &'a Catalog) -> Result<Self, GameError> {
        if config.max_years == 0 {
            return Err(GameError::InvalidConfiguration {
                reason: "a game must last at least one year",
            });
        }
        let mut available_fields = catalog.fields().to_vec();
        if available_fields.is_empty() {
            return Err(GameError::InvalidConfiguration {
                reason: "the field catalog is empty",
            });
        }
        let starting_field = available_fields.remove(0);
        Ok(Self {
            config,
            catalog,
            available_fields,
            farm: Farm::new(vec![starting_field], config.initial_money),
            year: 0,
            state: GameState::Active,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn crops(&self) -> &'a [Arc<Crop>] {
        self.catalog.crops()
    }

    /// Fields that can still be bought.
    #[must_use]
    pub fn available_fields(&self) -> &[Field] {
        &self.available_fields
    }

    #[must_use]
    pub fn farm(&self) -> &Farm {
        &self.farm
    }

    /// Number of completed years.
    #[must_use]
    pub fn year(&self) -> u32 {
        self.year
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn lowest_crop_cost(&self) -> i64 {
        self.catalog.lowest_crop_cost()
    }

    #[must_use]
    pub fn lowest_field_price(&self) -> Option<i64> {
        self.available_fields.iter().map(|field| field.price).min()
    }

    /// Whether the farm can no longer afford even the cheapest crop.
    #[must_use]
    pub fn is_bankrupt(&self) -> bool {
        self.farm.money() < self.lowest_crop_cost()
    }

    #[must_use]
    pub fn can_plant(&self) -> bool {
        self.farm.has_empty_field() && !self.is_bankrupt()
    }

    #[must_use]
    pub fn can_buy_field(&self) -> bool {
        self.lowest_field_price()
            .is_some_and(|price| price <= self.farm.money())
    }

    /// Actions the player may take right now, in menu order.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions = vec![Action::ReviewStatus, Action::ListCrops];
        if self.can_plant() {
            actions.push(Action::PlantCrops);
        }
        if self.can_buy_field() {
            actions.push(Action::BuyField);
        }
        actions.push(Action::AdvanceToHarvest);
        actions.push(Action::Retire);
        actions
    }

    /// Cash plus the purchase price of every owned field.
    #[must_use]
    pub fn final_score(&self) -> i64 {
        self.farm.net_worth()
    }

    /// Plays turns until the game completes or the player retires.
    ///
    /// Returns the final score.
    pub fn run<P, S, R>(
        &mut self,
        policy: &mut P,
        reporter: &mut S,
        rng: &mut R,
    ) -> Result<i64, GameError>
    where
        P: DecisionPolicy + ?Sized,
        S: GameReporter + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.state.is_active() {
            return Err(GameError::GameOver);
        }
        reporter.year_started(self);
        while self.state.is_active() {
            self.play_turn(policy, reporter, rng)?;
        }
        let score = self.final_score();
        tracing::debug!(score, years = self.year, state = ?self.state, "game finished");
        reporter.final_score(score);
        Ok(score)
    }

    /// Asks the policy for one action and executes it.
    pub fn play_turn<P, S, R>(
        &mut self,
        policy: &mut P,
        reporter: &mut S,
        rng: &mut R,
    ) -> Result<Action, GameError>
    where
        P: DecisionPolicy + ?Sized,
        S: GameReporter + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.state.is_active() {
            return Err(GameError::GameOver);
        }
        let actions = self.legal_actions();
        let action = policy.decide_action(self, &actions);
        self.play_action(action, policy, reporter, rng)?;
        Ok(action)
    }

    /// Executes `action` if it is currently legal.
    pub fn play_action<P, S, R>(
        &mut self,
        action: Action,
        policy: &mut P,
        reporter: &mut S,
        rng: &mut R,
    ) -> Result<(), GameError>
    where
        P: DecisionPolicy + ?Sized,
        S: GameReporter + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.state.is_active() {
            return Err(GameError::GameOver);
        }
        if !self.legal_actions().contains(&action) {
            return Err(GameError::IllegalAction { action });
        }
        tracing::trace!(year = self.year, %action, money = self.farm.money(), "action");
        match action {
            Action::ReviewStatus => reporter.status(self),
            Action::ListCrops => reporter.crop_catalog(self.crops()),
            Action::PlantCrops => self.plant_crops(policy)?,
            Action::BuyField => self.buy_field(policy)?,
            Action::AdvanceToHarvest => self.advance_year(reporter, rng),
            Action::Retire => self.state = GameState::Exited,
        }
        Ok(())
    }

    fn plant_crops<P>(&mut self, policy: &mut P) -> Result<(), GameError>
    where
        P: DecisionPolicy + ?Sized,
    {
        let catalog = self.catalog;
        let money = self.farm.money();

        let empty_indices = self.farm.empty_field_indices().collect::<Vec<_>>();
        let empty_fields = empty_indices
            .iter()
            .map(|&i| &self.farm.owned_fields()[i])
            .collect::<Vec<_>>();
        let choice = policy.decide_field_to_plant(self, &empty_fields);
        let field_index = *empty_indices.get(choice).ok_or(GameError::InvalidChoice {
            index: choice,
            count: empty_indices.len(),
        })?;

        let affordable_crops = catalog
            .crops()
            .iter()
            .filter(|crop| crop.cost <= money)
            .collect::<Vec<_>>();
        let choice = policy.decide_crop_to_plant(self, &affordable_crops);
        let crop = Arc::clone(affordable_crops.get(choice).ok_or(GameError::InvalidChoice {
            index: choice,
            count: affordable_crops.len(),
        })?);

        let field = &self.farm.owned_fields()[field_index];
        let affordable_quantity = u32::try_from((money / crop.cost).max(0)).unwrap_or(u32::MAX);
        let maximum = affordable_quantity.min(field.max_crop_quantity);
        let quantity = policy.decide_crop_quantity(self, field, &crop, maximum);
        if quantity > maximum {
            return Err(GameError::InvalidQuantity { quantity, maximum });
        }
        if quantity == 0 {
            return Ok(());
        }

        let cost = self.farm.plant(field_index, Arc::clone(&crop), quantity);
        tracing::trace!(crop = %crop.name, quantity, cost, "planted");
        Ok(())
    }

    fn buy_field<P>(&mut self, policy: &mut P) -> Result<(), GameError>
    where
        P: DecisionPolicy + ?Sized,
    {
        let money = self.farm.money();
        let affordable_indices = self
            .available_fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.price <= money)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        let affordable_fields = affordable_indices
            .iter()
            .map(|&i| &self.available_fields[i])
            .collect::<Vec<_>>();

        let Some(choice) = policy.decide_field_to_buy(self, &affordable_fields) else {
            return Ok(());
        };
        let index = *affordable_indices
            .get(choice)
            .ok_or(GameError::InvalidChoice {
                index: choice,
                count: affordable_indices.len(),
            })?;

        let field = self.available_fields.remove(index);
        tracing::trace!(field = %field.name, price = field.price, "bought field");
        self.farm.buy_field(field);
        Ok(())
    }

    /// Closes the current year: weather, harvest, bookkeeping, field clearing.
    fn advance_year<S, R>(&mut self, reporter: &mut S, rng: &mut R)
    where
        S: GameReporter + ?Sized,
        R: Rng + ?Sized,
    {
        let weather = self.config.weather.generate(rng);
        let expenditure = self.farm.current_year_expenditure();
        let new_assets = self.farm.current_year_new_assets();
        let income = self.farm.harvest(&weather);
        let financials = YearFinancials {
            year: self.year + 1,
            income,
            expenditure,
            new_assets,
        };

        reporter.weather(self, &weather);
        reporter.financials(&financials);
        reporter.field_performance(self.farm.owned_fields());

        self.farm.close_year(income);
        self.year += 1;
        tracing::debug!(
            year = self.year,
            heat = weather.heat,
            wetness = weather.wetness,
            income,
            expenditure,
            money = self.farm.money(),
            "year closed"
        );

        if self.is_bankrupt() {
            tracing::debug!(year = self.year, money = self.farm.money(), "farm is bankrupt");
            reporter.bankruptcy(self);
        }

        if self.year >= self.config.max_years {
            self.state = GameState::Complete;
        } else {
            reporter.year_started(self);
        }
    }
}
