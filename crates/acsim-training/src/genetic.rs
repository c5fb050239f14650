//! Population management for the evolutionary search.
//!
//! # Key Components
//!
//! - [`Individual`] - A strategy genome together with its fitness
//! - [`Population`] - Fixed-size collection of individuals evaluated together
//! - [`PopulationEvolver`] - Breeding parameters (selection pressure, mutation
//!   rates) and the generation step
//!
//! # Generation Step
//!
//! [`PopulationEvolver::evolve`] expects a population sorted by fitness and
//! produces the same number of children. For each child two parents are
//! drawn independently, with replacement, from a
//! [`GeometricSchedule`](crate::selection::GeometricSchedule); the child is
//! bred with [`weightings::create_child`] and then passed through
//! [`weightings::mutate`]. No individual survives unchanged.
//!
//! # Parallelization
//!
//! Fitness evaluation spawns one scoped thread per individual. Each thread
//! owns a [`Pcg32`] seeded from the caller's generator before spawning, and
//! only reads the shared catalog.

use std::{ops::RangeInclusive, panic, thread};

use acsim_engine::{Catalog, GameError};
use acsim_evaluator::{
    session_evaluator::SessionEvaluator,
    strategy::{Strategy, StrategyError},
};
use acsim_stats::descriptive::DescriptiveStats;
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{TrainingError, selection::GeometricSchedule, weightings};

/// Ranges for random genome initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct InitParams {
    pub weighting_range: RangeInclusive<u32>,
    pub field_ratio_range: RangeInclusive<f64>,
}

impl Default for InitParams {
    fn default() -> Self {
        Self {
            weighting_range: 1..=100,
            field_ratio_range: 1.0..=5.0,
        }
    }
}

/// A strategy genome and its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    strategy: Strategy,
    fitness: f64,
}

impl Individual {
    /// Wraps a strategy that has not been evaluated yet (fitness 0).
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            fitness: 0.0,
        }
    }

    /// Creates an individual with random weightings for every catalog crop.
    pub fn random<R>(
        catalog: &Catalog,
        params: &InitParams,
        rng: &mut R,
    ) -> Result<Self, StrategyError>
    where
        R: Rng + ?Sized,
    {
        let weightings = weightings::random(catalog, &params.weighting_range, rng);
        let field_ratio = weightings::random_field_ratio(&params.field_ratio_range, rng);
        let strategy = Strategy::for_catalog(catalog, weightings, field_ratio)?;
        Ok(Self::new(strategy))
    }

    #[must_use]
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Mean final score over the evaluated sessions.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }
}

/// An ordered collection of individuals.
///
/// After [`evaluate_fitness`](Self::evaluate_fitness) the individuals are
/// sorted by descending fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    #[must_use]
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Creates `count` random individuals.
    pub fn random<R>(
        catalog: &Catalog,
        count: usize,
        params: &InitParams,
        rng: &mut R,
    ) -> Result<Self, StrategyError>
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::random(catalog, params, rng))
            .collect::<Result<_, _>>()?;
        Ok(Self { individuals })
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The fittest individual, once evaluated.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    /// Evaluates every individual in parallel and sorts best first.
    ///
    /// The first simulation failure is returned; fitness values are then
    /// only partially updated and the population is left unsorted.
    pub fn evaluate_fitness<R>(
        &mut self,
        catalog: &Catalog,
        evaluator: &SessionEvaluator,
        rng: &mut R,
    ) -> Result<(), GameError>
    where
        R: Rng + ?Sized,
    {
        let seeds = (0..self.individuals.len())
            .map(|_| rng.random::<u64>())
            .collect::<Vec<_>>();

        thread::scope(|s| {
            let handles = self
                .individuals
                .iter_mut()
                .zip(seeds)
                .map(|(ind, seed)| {
                    s.spawn(move || -> Result<(), GameError> {
                        let mut rng = Pcg32::seed_from_u64(seed);
                        let fitness =
                            evaluator.play_and_evaluate_sessions(catalog, &ind.strategy, &mut rng)?;
                        tracing::debug!(
                            fitness,
                            field_ratio = ind.strategy.field_ratio(),
                            "individual evaluated"
                        );
                        ind.fitness = fitness;
                        Ok(())
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect::<Result<(), GameError>>()
        })?;

        // sort by fitness descending
        self.individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        Ok(())
    }

    /// Descriptive statistics of the population's fitness values.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    #[must_use]
    pub fn compute_fitness_stats(&self) -> DescriptiveStats {
        DescriptiveStats::new(self.individuals.iter().map(|ind| ind.fitness)).unwrap()
    }
}

/// Breeding parameters for one generation step.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationEvolver {
    /// Selection probability of the fittest rank (`p0`)
    pub selection_pressure: f64,
    /// Probability of re-rolling one crop weighting
    pub crop_mutation_rate: f64,
    /// Probability of shifting the field ratio (shares the crop draw)
    pub field_mutation_rate: f64,
    /// Largest field-ratio shift in either direction
    pub max_field_ratio_delta: f64,
    /// Range for re-rolled weightings
    pub weighting_range: RangeInclusive<u32>,
}

impl Default for PopulationEvolver {
    fn default() -> Self {
        Self {
            selection_pressure: 0.1,
            crop_mutation_rate: 0.1,
            field_mutation_rate: 0.05,
            max_field_ratio_delta: 0.5,
            weighting_range: 1..=100,
        }
    }
}

impl PopulationEvolver {
    /// Breeds the next generation from a population sorted best first.
    pub fn evolve<R>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<Population, TrainingError>
    where
        R: Rng + ?Sized,
    {
        assert!(
            population
                .individuals
                .is_sorted_by(|a, b| a.fitness >= b.fitness)
        );
        let schedule = GeometricSchedule::new(population.len(), self.selection_pressure)?;
        let parents = &population.individuals;

        let mut mutations = 0_usize;
        let mut children = Vec::with_capacity(parents.len());
        for _ in 0..parents.len() {
            let father = &parents[schedule.select(rng)];
            let mother = &parents[schedule.select(rng)];
            let mut child = weightings::create_child(&father.strategy, &mother.strategy)?;
            if weightings::mutate(
                &mut child,
                self.crop_mutation_rate,
                self.field_mutation_rate,
                &self.weighting_range,
                self.max_field_ratio_delta,
                rng,
            )? {
                mutations += 1;
            }
            children.push(Individual::new(child));
        }
        tracing::trace!(children = children.len(), mutations, "bred next generation");

        Ok(Population::new(children))
    }
}

#[cfg(test)]
mod tests {
    use acsim_engine::{Crop, CropId, Field, FieldId, GameConfig};
    use rand::SeedableRng as _;

    use super::*;

    fn catalog() -> Catalog {
        let crop = |id: u32, cost: i64, sale_price: i64| Crop {
            id: CropId(id),
            name: format!("Crop {id}"),
            description: String::new(),
            cost,
            sale_price,
            ideal_heat: 1.0,
            ideal_wetness: 1.0,
            heat_sensitivity: 0.5,
            wetness_sensitivity: 0.5,
        };
        Catalog::new(
            vec![crop(1, 10, 25), crop(2, 20, 30), crop(3, 5, 6)],
            vec![
                Field::new(FieldId(1), "Home", "", 10, 1.0, 100),
                Field::new(FieldId(2), "Hill", "", 20, 1.2, 300),
            ],
        )
        .unwrap()
    }

    fn evaluated(fitness_values: &[f64]) -> Population {
        let mut rng = Pcg32::seed_from_u64(0);
        let catalog = catalog();
        let individuals = fitness_values
            .iter()
            .map(|&fitness| {
                let mut ind =
                    Individual::random(&catalog, &InitParams::default(), &mut rng).unwrap();
                ind.fitness = fitness;
                ind
            })
            .collect();
        Population::new(individuals)
    }

    #[test]
    fn test_random_population() {
        let catalog = catalog();
        let mut rng = Pcg32::seed_from_u64(1);
        let population =
            Population::random(&catalog, 20, &InitParams::default(), &mut rng).unwrap();
        assert_eq!(population.len(), 20);
        for ind in population.individuals() {
            assert!(ind.fitness().abs() < f64::EPSILON);
            assert_eq!(ind.strategy().crop_weightings().len(), 3);
            assert!((1.0..=5.0).contains(&ind.strategy().field_ratio()));
        }
    }

    #[test]
    fn test_evaluate_sorts_descending() {
        let catalog = catalog();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut population =
            Population::random(&catalog, 12, &InitParams::default(), &mut rng).unwrap();
        let evaluator = SessionEvaluator::new(GameConfig::default(), 3);
        population
            .evaluate_fitness(&catalog, &evaluator, &mut rng)
            .unwrap();
        assert!(
            population
                .individuals()
                .is_sorted_by(|a, b| a.fitness() >= b.fitness())
        );
        let stats = population.compute_fitness_stats();
        assert!((stats.max - population.best().unwrap().fitness()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_evaluation_is_reproducible() {
        let catalog = catalog();
        let evaluator = SessionEvaluator::new(GameConfig::default(), 2);
        let run = || {
            let mut rng = Pcg32::seed_from_u64(7);
            let mut population =
                Population::random(&catalog, 8, &InitParams::default(), &mut rng).unwrap();
            population
                .evaluate_fitness(&catalog, &evaluator, &mut rng)
                .unwrap();
            population
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_evolve_keeps_size_and_genes() {
        let population = evaluated(&[50.0, 40.0, 30.0, 20.0, 10.0]);
        let evolver = PopulationEvolver {
            selection_pressure: 0.5,
            crop_mutation_rate: 0.5,
            field_mutation_rate: 0.5,
            ..PopulationEvolver::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let next = evolver.evolve(&population, &mut rng).unwrap();
        assert_eq!(next.len(), population.len());
        for ind in next.individuals() {
            assert!(ind.fitness().abs() < f64::EPSILON);
            assert_eq!(ind.strategy().crop_weightings().len(), 3);
        }
    }

    #[test]
    fn test_full_pressure_clones_the_best() {
        let population = evaluated(&[50.0, 40.0, 30.0]);
        let evolver = PopulationEvolver {
            selection_pressure: 1.0,
            crop_mutation_rate: 0.0,
            field_mutation_rate: 0.0,
            ..PopulationEvolver::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        let next = evolver.evolve(&population, &mut rng).unwrap();
        let best = population.best().unwrap().strategy();
        assert!(next.individuals().iter().all(|ind| ind.strategy() == best));
    }

    #[test]
    fn test_invalid_pressure_is_an_error() {
        let population = evaluated(&[3.0, 2.0, 1.0]);
        let evolver = PopulationEvolver {
            selection_pressure: 0.2,
            ..PopulationEvolver::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        assert!(matches!(
            evolver.evolve(&population, &mut rng),
            Err(TrainingError::Selection(_))
        ));
    }
}
