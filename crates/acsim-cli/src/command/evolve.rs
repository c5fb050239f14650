use std::path::PathBuf;

use acsim_engine::Catalog;
use acsim_training::{
    evolution::{EvolutionParams, Evolver, GenerationSummary},
    genetic::PopulationEvolver,
};

use crate::{command::GameArg, schema::strategy_model::StrategyModel, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvolveArg {
    #[clap(flatten)]
    game: GameArg,
    /// Number of generations to evolve
    #[arg(long, default_value_t = 100)]
    generations: usize,
    /// Number of strategies per generation
    #[arg(long, default_value_t = 50)]
    population: usize,
    /// Games each strategy plays per generation
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Selection probability of the fittest strategy (must exceed 1/population)
    #[arg(long, default_value_t = 0.1)]
    selection_pressure: f64,
    /// Report progress every this many generations
    #[arg(long, default_value_t = 10)]
    report_interval: usize,
    /// Number of strategies listed in each report
    #[arg(long, default_value_t = 5)]
    top: usize,
    /// Name stored in the saved model
    #[arg(long, default_value = "evolved")]
    name: String,
    /// Output file path for the best strategy
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &EvolveArg) -> anyhow::Result<()> {
    let EvolveArg {
        game,
        generations,
        population,
        games,
        selection_pressure,
        report_interval,
        top,
        name,
        output,
    } = arg;

    let catalog = game.load_catalog()?;
    let config = game.game_config()?;
    let mut rng = game.rng();

    let params = EvolutionParams {
        population_size: *population,
        generations: *generations,
        games_per_strategy: *games,
        report_interval: *report_interval,
        top_count: *top,
        evolver: PopulationEvolver {
            selection_pressure: *selection_pressure,
            ..PopulationEvolver::default()
        },
        ..EvolutionParams::default()
    };
    let evolver = Evolver::new(&catalog, config, params);
    let population = evolver.run(&mut rng, |summary| report(&catalog, summary))?;

    let best = population
        .best()
        .ok_or_else(|| anyhow::anyhow!("No generation was evaluated"))?;
    let model =
        StrategyModel::from_strategy(name.clone(), best.fitness(), best.strategy(), &catalog);
    Output::save_json(&model, output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Fitness: {:.1}", model.fitness);
    eprintln!("  Field ratio: {:.3}", model.field_ratio);

    Ok(())
}

fn report(catalog: &Catalog, summary: &GenerationSummary<'_>) {
    let GenerationSummary {
        generation,
        generations,
        fitness,
        top,
    } = summary;
    eprintln!("Generation {generation}/{generations}:");
    eprintln!("  Fitness Stats:");
    eprintln!("    Min:     {:.1}", fitness.min);
    eprintln!("    Max:     {:.1}", fitness.max);
    eprintln!("    Mean:    {:.1}", fitness.mean);
    eprintln!("    Std-dev: {:.1}", fitness.std_dev);
    eprintln!("  Best Strategies:");
    for (i, ind) in top.iter().enumerate() {
        eprintln!(
            "  {i:2}: {:.1} => {}",
            ind.fitness(),
            ind.strategy().describe(catalog.crops())
        );
    }
}
