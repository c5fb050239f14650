use std::{io, path::PathBuf};

use acsim_engine::Game;
use acsim_evaluator::{policy::StrategyPolicy, session_evaluator::SessionEvaluator};
use anyhow::Context as _;

use crate::{
    command::GameArg,
    console::{ConsolePolicy, ConsoleReporter, WeatherNarrative},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    #[clap(flatten)]
    game: GameArg,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[clap(flatten)]
    game: GameArg,
    /// Path to the evolved strategy model (JSON format)
    #[arg(long)]
    strategy: PathBuf,
    /// Number of games to play; more than one prints only the average score
    #[arg(long, default_value_t = 1)]
    games: usize,
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg { game: game_arg } = arg;
    let catalog = game_arg.load_catalog()?;
    let mut game = Game::new(game_arg.game_config()?, &catalog)?;
    let mut rng = game_arg.rng();

    let mut policy = ConsolePolicy::new(io::stdin().lock(), io::stdout());
    let mut reporter = ConsoleReporter::new(io::stdout(), WeatherNarrative::default());
    reporter.greet(&game);
    let score = game.run(&mut policy, &mut reporter, &mut rng)?;

    if let Some(e) = policy.take_error().or_else(|| reporter.take_error()) {
        return Err(e).context("Console I/O failed");
    }
    tracing::debug!(score, state = ?game.state(), "manual game finished");
    Ok(())
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        game: game_arg,
        strategy: model_path,
        games,
    } = arg;
    anyhow::ensure!(*games > 0, "At least one game must be played");

    let catalog = game_arg.load_catalog()?;
    let model = util::read_strategy_model_file(model_path)?;
    let strategy = model.to_strategy(&catalog)?;
    let config = game_arg.game_config()?;
    let mut rng = game_arg.rng();

    eprintln!("Strategy {}: {}", model.name, strategy.describe(catalog.crops()));

    if *games > 1 {
        let evaluator = SessionEvaluator::new(config, *games);
        let fitness = evaluator.play_and_evaluate_sessions(&catalog, &strategy, &mut rng)?;
        println!("Average score over {games} games: {fitness:.1}");
        return Ok(());
    }

    let mut game = Game::new(config, &catalog)?;
    let mut policy = StrategyPolicy::from_rng(&strategy, &mut rng);
    let mut reporter = ConsoleReporter::new(io::stdout(), WeatherNarrative::default());
    reporter.greet(&game);
    game.run(&mut policy, &mut reporter, &mut rng)?;
    if let Some(e) = reporter.take_error() {
        return Err(e).context("Console output failed");
    }
    Ok(())
}
