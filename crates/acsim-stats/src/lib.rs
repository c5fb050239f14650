//! Statistics helpers for tracking evolution progress.
//!
//! - [`descriptive`]: Summary statistics (min, max, mean, spread) of a dataset
//!
//! # Example
//!
//! ```
//! use acsim_stats::descriptive::DescriptiveStats;
//!
//! let fitness = [800.0, 650.0, 720.0, 910.0];
//! let stats = DescriptiveStats::new(fitness).unwrap();
//! assert_eq!(stats.max, 910.0);
//! assert_eq!(stats.count, 4);
//! ```

pub mod descriptive;
