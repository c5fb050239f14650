use std::{
    fmt,
    io::{self, Write},
    sync::Arc,
};

use acsim_engine::{Crop, Field, Game, GameReporter, Weather, YearFinancials};

use super::WeatherNarrative;

/// Prints game events as plain text.
#[derive(Debug)]
pub struct ConsoleReporter<W> {
    output: W,
    narrative: WeatherNarrative,
    error: Option<io::Error>,
}

impl<W> ConsoleReporter<W>
where
    W: Write,
{
    pub fn new(output: W, narrative: WeatherNarrative) -> Self {
        Self {
            output,
            narrative,
            error: None,
        }
    }

    pub fn greet(&mut self, game: &Game<'_>) {
        self.say(format_args!(
            "Welcome to Agricultural Capitalism Simulator!\n\n\
             You have {} years to make maximum profit.\n",
            game.config().max_years
        ));
    }

    /// The first write error, if any. Later output is dropped after one.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn say(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.output.write_fmt(args) {
            self.error = Some(e);
        }
    }
}

impl<W> GameReporter for ConsoleReporter<W>
where
    W: Write,
{
    fn year_started(&mut self, game: &Game<'_>) {
        self.say(format_args!(
            "\n=== Year {} of {} ===\nYou have {} in the bank.\n",
            game.year() + 1,
            game.config().max_years,
            game.farm().money()
        ));
    }

    fn status(&mut self, game: &Game<'_>) {
        let farm = game.farm();
        self.say(format_args!(
            "\nMoney: {}\nField assets: {}\nFields owned:\n",
            farm.money(),
            farm.assets()
        ));
        for field in farm.owned_fields() {
            match field.planting() {
                Some(planting) => self.say(format_args!(
                    "  {}: {} x {}\n",
                    field.name,
                    planting.quantity(),
                    planting.crop().name
                )),
                None => self.say(format_args!(
                    "  {}: empty (room for {})\n",
                    field.name, field.max_crop_quantity
                )),
            }
        }
    }

    fn crop_catalog(&mut self, crops: &[Arc<Crop>]) {
        self.say(format_args!("\nAvailable crops:\n"));
        for crop in crops {
            self.say(format_args!(
                "  {}: {}\n    Cost: {}. Sale price: {}.\n",
                crop.name, crop.description, crop.cost, crop.sale_price
            ));
        }
    }

    fn weather(&mut self, game: &Game<'_>, weather: &Weather) {
        let sentence = self.narrative.describe(&game.config().weather, weather);
        self.say(format_args!("\n--- Harvest ---\n{sentence}\n"));
    }

    fn financials(&mut self, financials: &YearFinancials) {
        self.say(format_args!(
            "Income: {}\nExpenditure: {} (of which {} on new fields)\nProfit: {}\n",
            financials.income,
            financials.expenditure,
            financials.new_assets,
            financials.profit()
        ));
    }

    fn field_performance(&mut self, fields: &[Field]) {
        for field in fields.iter().filter(|field| !field.is_empty()) {
            self.say(format_args!(
                "  {} earned {}\n",
                field.name,
                field.last_revenue()
            ));
        }
    }

    fn bankruptcy(&mut self, _game: &Game<'_>) {
        self.say(format_args!("You can no longer afford to plant any crops.\n"));
    }

    fn final_score(&mut self, score: i64) {
        self.say(format_args!("\nYour final score is {score}.\n"));
    }
}

#[cfg(test)]
mod tests {
    use acsim_engine::{Catalog, CropId, FieldId, GameConfig};

    use super::*;

    #[test]
    fn test_year_report() {
        let catalog = Catalog::new(
            vec![Crop {
                id: CropId(1),
                name: "Wheat".to_owned(),
                description: "Golden.".to_owned(),
                cost: 10,
                sale_price: 20,
                ideal_heat: 1.0,
                ideal_wetness: 1.0,
                heat_sensitivity: 1.0,
                wetness_sensitivity: 1.0,
            }],
            vec![Field::new(FieldId(1), "Home", "", 10, 1.0, 100)],
        )
        .unwrap();
        let game = Game::new(GameConfig::default(), &catalog).unwrap();
        let mut reporter = ConsoleReporter::new(Vec::new(), WeatherNarrative::default());

        reporter.year_started(&game);
        reporter.crop_catalog(catalog.crops());
        reporter.weather(&game, &Weather::IDEAL);
        reporter.financials(&YearFinancials {
            year: 1,
            income: 300,
            expenditure: 250,
            new_assets: 100,
        });
        reporter.final_score(650);
        assert!(reporter.take_error().is_none());

        let text = String::from_utf8(reporter.output).unwrap();
        assert!(text.contains("Year 1 of 20"));
        assert!(text.contains("Wheat: Golden."));
        assert!(text.contains("This was a mild year with moderate rainfall."));
        assert!(text.contains("Profit: 150"));
        assert!(text.contains("Your final score is 650."));
    }
}
