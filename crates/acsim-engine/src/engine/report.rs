use std::sync::Arc;

use crate::{Crop, Field, Weather};

use super::Game;

/// Money movements of one closed year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearFinancials {
    /// The year that was closed, starting at 1.
    pub year: u32,
    pub income: i64,
    /// Everything spent during the year, field purchases included.
    pub expenditure: i64,
    /// Spending on fields.
    pub new_assets: i64,
}

impl YearFinancials {
    /// Income minus running costs; money spent on fields is not a loss.
    #[must_use]
    pub fn profit(&self) -> i64 {
        self.income - (self.expenditure - self.new_assets)
    }
}

/// Observer of game outcomes.
///
/// Every method defaults to doing nothing, and the game never depends on what
/// a reporter does.
pub trait GameReporter {
    fn year_started(&mut self, _game: &Game<'_>) {}

    fn status(&mut self, _game: &Game<'_>) {}

    fn crop_catalog(&mut self, _crops: &[Arc<Crop>]) {}

    fn weather(&mut self, _game: &Game<'_>, _weather: &Weather) {}

    fn financials(&mut self, _financials: &YearFinancials) {}

    /// Called after harvest, before fields are cleared.
    fn field_performance(&mut self, _fields: &[Field]) {}

    fn bankruptcy(&mut self, _game: &Game<'_>) {}

    fn final_score(&mut self, _score: i64) {}
}

/// Reporter that discards everything. Used for automated play.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl GameReporter for NullReporter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profit_excludes_new_assets() {
        let financials = YearFinancials {
            year: 1,
            income: 500,
            expenditure: 400,
            new_assets: 300,
        };
        assert_eq!(financials.profit(), 400);
    }
}
