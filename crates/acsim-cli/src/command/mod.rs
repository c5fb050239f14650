use std::path::PathBuf;

use acsim_engine::{
    Catalog, DEFAULT_INITIAL_MONEY, DEFAULT_MAX_YEARS, DEFAULT_WEATHER_DEVIATION, GameConfig,
    WeatherGenerator,
};
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::catalog;

use self::{
    evolve::EvolveArg,
    play::{AutoPlayArg, ManualPlayArg},
};

mod evolve;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game at the console
    #[command(name = "play")]
    ManualPlay(#[clap(flatten)] ManualPlayArg),
    /// Let an evolved strategy play
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Evolve strategies with a genetic algorithm
    Evolve(#[clap(flatten)] EvolveArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args
        .mode
        .unwrap_or(Mode::ManualPlay(ManualPlayArg::default()))
    {
        Mode::ManualPlay(arg) => play::run_manual(&arg)?,
        Mode::AutoPlay(arg) => play::run_auto(&arg)?,
        Mode::Evolve(arg) => evolve::run(&arg)?,
    }
    Ok(())
}

/// Options shared by every mode that plays games.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GameArg {
    /// Number of years a game lasts
    #[arg(long, default_value_t = DEFAULT_MAX_YEARS)]
    years: u32,
    /// Money the farm starts with
    #[arg(long, default_value_t = DEFAULT_INITIAL_MONEY)]
    money: i64,
    /// Standard deviation of the yearly heat and wetness factors
    #[arg(long, default_value_t = DEFAULT_WEATHER_DEVIATION)]
    weather_deviation: f64,
    /// Crop and field catalog (JSON); the built-in catalog if omitted
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Random seed; drawn from the OS if omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for GameArg {
    fn default() -> Self {
        Self {
            years: DEFAULT_MAX_YEARS,
            money: DEFAULT_INITIAL_MONEY,
            weather_deviation: DEFAULT_WEATHER_DEVIATION,
            catalog: None,
            seed: None,
        }
    }
}

impl GameArg {
    pub(crate) fn load_catalog(&self) -> anyhow::Result<Catalog> {
        catalog::load(self.catalog.as_deref())
    }

    pub(crate) fn game_config(&self) -> anyhow::Result<GameConfig> {
        let weather = WeatherGenerator::new(self.weather_deviation, self.weather_deviation)
            .context("Invalid weather deviation")?;
        Ok(GameConfig {
            max_years: self.years,
            initial_money: self.money,
            weather,
        })
    }

    pub(crate) fn rng(&self) -> Pcg32 {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        tracing::info!(seed, "seeded random generator");
        Pcg32::seed_from_u64(seed)
    }
}
