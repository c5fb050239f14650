//! Text console front end: a stdin-driven decision policy and a stdout
//! reporter.

pub use self::{policy::ConsolePolicy, reporter::ConsoleReporter, weather_bands::WeatherNarrative};

mod policy;
mod reporter;
mod weather_bands;
