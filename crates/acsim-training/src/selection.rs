//! Rank-based parent selection with a geometric probability schedule.
//!
//! For a population of `n` individuals ranked best first, rank `k` (0-based)
//! is selected with probability
//!
//! ```text
//! P(k) = p0 · r^k
//! ```
//!
//! where `p0` is the selection pressure and the common ratio `r < 1` makes the
//! schedule sum to 1:
//!
//! ```text
//! p0 · (1 − r^n) / (1 − r) = 1   ⇔   r = 1 − p0 · (1 − r^n)
//! ```
//!
//! The right-hand form is solved by fixed-point iteration from `r = 1 − p0`.
//! The iteration climbs monotonically to the root below 1, which exists only
//! when `p0 > 1/n`; for smaller pressures the uniform schedule already gives
//! every rank more than `p0`.

use rand::Rng;

/// Consecutive ratio estimates closer than this are considered converged.
pub const TOLERANCE: f64 = 1e-6;

/// Upper bound on fixed-point iterations.
pub const MAX_ITERATIONS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SelectionError {
    #[display("common ratio did not converge after {iterations} iterations")]
    ConvergenceFailure { iterations: usize },
    #[display("selection pressure {pressure} must lie in (1/{size}, 1]")]
    InvalidPressure { pressure: f64, size: usize },
    #[display("cannot select from an empty population")]
    EmptyPopulation,
}

/// Selection probabilities per rank, best rank first.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricSchedule {
    common_ratio: f64,
    probabilities: Vec<f64>,
}

impl GeometricSchedule {
    /// Builds the schedule for `size` ranks with top-rank probability
    /// `selection_pressure`.
    ///
    /// A single-rank schedule always selects that rank, whatever the pressure.
    ///
    /// # Examples
    ///
    /// ```
    /// use acsim_training::selection::GeometricSchedule;
    ///
    /// let schedule = GeometricSchedule::new(50, 0.1).unwrap();
    /// assert!((schedule.probabilities()[0] - 0.1).abs() < 1e-12);
    /// assert!(schedule.total_probability() >= 0.99);
    /// ```
    pub fn new(size: usize, selection_pressure: f64) -> Result<Self, SelectionError> {
        if size == 0 {
            return Err(SelectionError::EmptyPopulation);
        }
        if size == 1 {
            return Ok(Self {
                common_ratio: 0.0,
                probabilities: vec![1.0],
            });
        }

        let common_ratio = solve_common_ratio(size, selection_pressure)?;
        let mut probability = selection_pressure;
        let probabilities = (0..size)
            .map(|_| {
                let p = probability;
                probability *= common_ratio;
                p
            })
            .collect();
        Ok(Self {
            common_ratio,
            probabilities,
        })
    }

    #[must_use]
    pub fn common_ratio(&self) -> f64 {
        self.common_ratio
    }

    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all rank probabilities. Slightly below 1 after rounding.
    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Maps a uniform draw `u` in `[0, 1)` to a rank.
    ///
    /// Residual mass left by rounding falls through to the last rank.
    #[must_use]
    pub fn select_index(&self, u: f64) -> usize {
        let mut cumulative = 0.0;
        for (rank, p) in self.probabilities.iter().enumerate() {
            cumulative += p;
            if u < cumulative {
                return rank;
            }
        }
        self.probabilities.len() - 1
    }

    /// Draws a rank.
    pub fn select<R>(&self, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        self.select_index(rng.random())
    }
}

#[expect(clippy::cast_precision_loss)]
fn solve_common_ratio(size: usize, pressure: f64) -> Result<f64, SelectionError> {
    let n = size as f64;
    if !(pressure > 1.0 / n && pressure <= 1.0) {
        return Err(SelectionError::InvalidPressure { pressure, size });
    }

    let mut ratio = 1.0 - pressure;
    for _ in 0..MAX_ITERATIONS {
        let next = 1.0 - pressure * (1.0 - ratio.powf(n));
        if (next - ratio).abs() < TOLERANCE {
            return Ok(next);
        }
        ratio = next;
    }
    Err(SelectionError::ConvergenceFailure {
        iterations: MAX_ITERATIONS,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_schedule_sums_close_to_one() {
        for (size, pressure) in [(50, 0.1), (10, 0.3), (100, 0.05), (2, 0.9), (5, 1.0)] {
            let schedule = GeometricSchedule::new(size, pressure).unwrap();
            let total = schedule.total_probability();
            assert!(total >= 0.99, "size {size}, pressure {pressure}: {total}");
            assert!(total <= 1.0 + 1e-9, "size {size}, pressure {pressure}: {total}");
        }
    }

    #[test]
    fn test_probabilities_decrease_by_rank() {
        let schedule = GeometricSchedule::new(50, 0.1).unwrap();
        assert!(schedule.common_ratio() < 1.0);
        assert!(
            schedule
                .probabilities()
                .windows(2)
                .all(|pair| pair[0] > pair[1])
        );
        assert!((schedule.probabilities()[0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_solves_fixed_point() {
        let schedule = GeometricSchedule::new(20, 0.2).unwrap();
        let r = schedule.common_ratio();
        let residual = r - (1.0 - 0.2 * (1.0 - r.powi(20)));
        assert!(residual.abs() < 1e-5);
    }

    #[test]
    fn test_single_rank() {
        let schedule = GeometricSchedule::new(1, 0.1).unwrap();
        assert_eq!(schedule.probabilities(), &[1.0]);
        assert_eq!(schedule.select_index(0.999), 0);
    }

    #[test]
    fn test_invalid_pressure() {
        assert_eq!(
            GeometricSchedule::new(10, 0.1),
            Err(SelectionError::InvalidPressure {
                pressure: 0.1,
                size: 10
            })
        );
        assert!(GeometricSchedule::new(10, 1.5).is_err());
        assert!(GeometricSchedule::new(10, f64::NAN).is_err());
        assert_eq!(
            GeometricSchedule::new(0, 0.5),
            Err(SelectionError::EmptyPopulation)
        );
    }

    #[test]
    fn test_select_index_walks_cumulative() {
        let schedule = GeometricSchedule::new(3, 0.5).unwrap();
        assert_eq!(schedule.select_index(0.0), 0);
        assert_eq!(schedule.select_index(0.49), 0);
        assert_eq!(schedule.select_index(0.51), 1);
        // Anything past the cumulative total goes to the last rank.
        assert_eq!(schedule.select_index(1.0), 2);
    }

    #[test]
    fn test_draws_favor_top_ranks() {
        let schedule = GeometricSchedule::new(50, 0.1).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut counts = [0_usize; 50];
        for _ in 0..20_000 {
            counts[schedule.select(&mut rng)] += 1;
        }
        assert!(counts[0] > counts[10]);
        assert!(counts[10] > counts[40]);
        assert!((1800..=2200).contains(&counts[0]), "{}", counts[0]);
    }
}
