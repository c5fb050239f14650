//! Evolutionary search for farming strategies.
//!
//! This crate evolves [`Strategy`](acsim_evaluator::strategy::Strategy)
//! genomes so that the automated policy driving them ends games with a high
//! net worth.
//!
//! # How Training Works
//!
//! 1. **Initialization** - Create a population of strategies with random crop
//!    weightings and field ratios
//! 2. **Evaluation** - Each strategy plays several independent games; its
//!    fitness is the mean final score
//! 3. **Ranking** - The population is sorted by fitness, best first
//! 4. **Selection** - Parents are drawn by rank from a geometric probability
//!    schedule
//! 5. **Breeding** - Crop weightings are inherited by crop identifier parity;
//!    the field ratio is averaged
//! 6. **Mutation** - One crop weighting is occasionally re-rolled and the
//!    field ratio nudged
//! 7. **Repeat** - For a fixed number of generations
//!
//! # Architecture
//!
//! ```text
//! Evolver (evolution)
//!     ↓ drives
//! Population / PopulationEvolver (genetic)
//!     ↓ ranks with             ↓ breeds with
//! GeometricSchedule        create_child / mutate
//! (selection)              (weightings)
//!     ↓ fitness from
//! SessionEvaluator (acsim-evaluator)
//! ```
//!
//! # Determinism
//!
//! Every random consumer takes the generator explicitly. Parallel evaluation
//! derives one seed per individual from the caller's generator before any
//! thread starts, so a fixed seed reproduces a run exactly.

use acsim_engine::GameError;
use acsim_evaluator::strategy::StrategyError;

use crate::selection::SelectionError;

pub mod evolution;
pub mod genetic;
pub mod selection;
pub mod weightings;

/// Failure of an optimizer run.
///
/// Any simulation failure aborts the whole run.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingError {
    #[display("simulation failed: {_0}")]
    Game(GameError),
    #[display("invalid strategy: {_0}")]
    Strategy(StrategyError),
    #[display("parent selection failed: {_0}")]
    Selection(SelectionError),
    #[display("invalid evolution parameters: {reason}")]
    #[from(ignore)]
    InvalidParameters { reason: &'static str },
}
