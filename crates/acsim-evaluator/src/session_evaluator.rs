//! Session evaluation: turning repeated games into a fitness value.
//!
//! A session is one complete game played by a [`StrategyPolicy`] against a
//! fresh copy of the catalog fields. The fitness of a strategy is the
//! arithmetic mean of the final scores of several independent sessions:
//!
//! ```text
//! fitness = Σ final_score(session_i) / games
//! ```
//!
//! Sessions share nothing mutable except the random generator passed in, so
//! callers that want parallel evaluation hand each worker its own generator.

use acsim_engine::{Catalog, Game, GameConfig, GameError, NullReporter};
use rand::Rng;

use crate::{policy::StrategyPolicy, strategy::Strategy};

/// Plays and scores game sessions for a strategy.
#[derive(Debug, Clone, Copy)]
pub struct SessionEvaluator {
    config: GameConfig,
    games: usize,
}

impl SessionEvaluator {
    /// Creates an evaluator that averages over `games` sessions.
    ///
    /// # Panics
    ///
    /// Panics if `games` is zero.
    #[must_use]
    pub fn new(config: GameConfig, games: usize) -> Self {
        assert!(games > 0, "at least one game is needed to evaluate fitness");
        Self { config, games }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn games(&self) -> usize {
        self.games
    }

    /// Plays one full game and returns its final score.
    pub fn play_session<R>(
        &self,
        catalog: &Catalog,
        strategy: &Strategy,
        rng: &mut R,
    ) -> Result<i64, GameError>
    where
        R: Rng + ?Sized,
    {
        let mut game = Game::new(self.config, catalog)?;
        let mut policy = StrategyPolicy::from_rng(strategy, rng);
        let score = game.run(&mut policy, &mut NullReporter, rng)?;
        if game.is_bankrupt() {
            tracing::trace!(score, "session ended bankrupt");
        }
        Ok(score)
    }

    /// Plays every session and returns the mean final score.
    #[expect(clippy::cast_precision_loss)]
    pub fn play_and_evaluate_sessions<R>(
        &self,
        catalog: &Catalog,
        strategy: &Strategy,
        rng: &mut R,
    ) -> Result<f64, GameError>
    where
        R: Rng + ?Sized,
    {
        let mut total = 0_i64;
        for _ in 0..self.games {
            total += self.play_session(catalog, strategy, rng)?;
        }
        Ok(total as f64 / self.games as f64)
    }
}
