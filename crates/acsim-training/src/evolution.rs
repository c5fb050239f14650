//! The generation loop.
//!
//! ```text
//! Initializing → Evaluating → Ranking → [Reporting] → Breeding/Mutating ─┐
//!                     ↑                                                  │
//!                     └──────────────────────────────────────────────────┘
//!                (after the last generation: Evaluating → Ranking → Done)
//! ```
//!
//! Reporting happens every `report_interval` generations and after the last
//! one. It is purely observational and never affects the search.

use acsim_engine::{Catalog, GameConfig};
use acsim_evaluator::session_evaluator::SessionEvaluator;
use acsim_stats::descriptive::DescriptiveStats;
use rand::Rng;

use crate::{
    TrainingError,
    genetic::{Individual, InitParams, Population, PopulationEvolver},
};

/// Parameters of a complete optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionParams {
    pub population_size: usize,
    pub generations: usize,
    /// Games played per strategy to compute its fitness
    pub games_per_strategy: usize,
    /// Report every this many generations; 0 reports only the last one
    pub report_interval: usize,
    /// How many top individuals each report lists
    pub top_count: usize,
    pub init: InitParams,
    pub evolver: PopulationEvolver,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            games_per_strategy: 10,
            report_interval: 10,
            top_count: 5,
            init: InitParams::default(),
            evolver: PopulationEvolver::default(),
        }
    }
}

/// Progress snapshot handed to the report callback.
#[derive(Debug, Clone)]
pub struct GenerationSummary<'a> {
    /// 1-based generation number
    pub generation: usize,
    pub generations: usize,
    pub fitness: DescriptiveStats,
    /// The fittest individuals, best first
    pub top: &'a [Individual],
}

impl GenerationSummary<'_> {
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.generation == self.generations
    }
}

/// Runs the evolutionary search over one catalog.
#[derive(Debug)]
pub struct Evolver<'c> {
    catalog: &'c Catalog,
    config: GameConfig,
    params: EvolutionParams,
}

impl<'c> Evolver<'c> {
    #[must_use]
    pub fn new(catalog: &'c Catalog, config: GameConfig, params: EvolutionParams) -> Self {
        Self {
            catalog,
            config,
            params,
        }
    }

    #[must_use]
    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    /// Evolves a population and returns the last generation, best first.
    ///
    /// `on_report` is called with a summary at every reporting point.
    ///
    /// # Examples
    ///
    /// ```
    /// use acsim_engine::{Catalog, Crop, CropId, Field, FieldId, GameConfig};
    /// use acsim_training::{
    ///     evolution::{EvolutionParams, Evolver},
    ///     genetic::PopulationEvolver,
    /// };
    /// use rand::SeedableRng as _;
    /// use rand_pcg::Pcg32;
    ///
    /// let catalog = Catalog::new(
    ///     vec![Crop {
    ///         id: CropId(1),
    ///         name: "Potato".to_owned(),
    ///         description: String::new(),
    ///         cost: 5,
    ///         sale_price: 9,
    ///         ideal_heat: 1.0,
    ///         ideal_wetness: 1.0,
    ///         heat_sensitivity: 1.0,
    ///         wetness_sensitivity: 1.0,
    ///     }],
    ///     vec![Field::new(FieldId(1), "Home", "", 10, 1.0, 100)],
    /// )
    /// .unwrap();
    /// let params = EvolutionParams {
    ///     population_size: 10,
    ///     generations: 3,
    ///     games_per_strategy: 2,
    ///     evolver: PopulationEvolver {
    ///         selection_pressure: 0.3,
    ///         ..PopulationEvolver::default()
    ///     },
    ///     ..EvolutionParams::default()
    /// };
    /// let evolver = Evolver::new(&catalog, GameConfig::default(), params);
    /// let mut reports = 0;
    /// let population = evolver
    ///     .run(&mut Pcg32::seed_from_u64(0), |_| reports += 1)
    ///     .unwrap();
    /// assert_eq!(population.len(), 10);
    /// assert_eq!(reports, 1);
    /// ```
    pub fn run<R, F>(&self, rng: &mut R, mut on_report: F) -> Result<Population, TrainingError>
    where
        R: Rng + ?Sized,
        F: FnMut(&GenerationSummary<'_>),
    {
        let params = &self.params;
        if params.population_size == 0 {
            return Err(TrainingError::InvalidParameters {
                reason: "population size must be positive",
            });
        }
        if params.generations == 0 {
            return Err(TrainingError::InvalidParameters {
                reason: "generation count must be positive",
            });
        }
        if params.games_per_strategy == 0 {
            return Err(TrainingError::InvalidParameters {
                reason: "games per strategy must be positive",
            });
        }

        let evaluator = SessionEvaluator::new(self.config, params.games_per_strategy);
        let mut population =
            Population::random(self.catalog, params.population_size, &params.init, rng)?;

        for generation in 1..=params.generations {
            population.evaluate_fitness(self.catalog, &evaluator, rng)?;

            let fitness = population.compute_fitness_stats();
            tracing::info!(
                generation,
                best = fitness.max,
                mean = fitness.mean,
                worst = fitness.min,
                std_dev = fitness.std_dev,
                "generation evaluated"
            );

            let is_final = generation == params.generations;
            if is_final || (params.report_interval > 0 && generation % params.report_interval == 0)
            {
                let top_count = params.top_count.min(population.len());
                on_report(&GenerationSummary {
                    generation,
                    generations: params.generations,
                    fitness,
                    top: &population.individuals()[..top_count],
                });
            }

            if !is_final {
                population = params.evolver.evolve(&population, rng)?;
            }
        }

        Ok(population)
    }
}
