/// Summary of a dataset of `f64` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// `std_dev / |mean|`, or zero when the mean is zero.
    pub coefficient_of_variation: f64,
}

impl DescriptiveStats {
    /// Computes statistics in a single pass.
    ///
    /// Returns `None` for an empty dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use acsim_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.min, 2.0);
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.std_dev, 2.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        // Welford's online algorithm
        let mut count = 0_usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for value in values {
            count += 1;
            min = min.min(value);
            max = max.max(value);
            let delta = value - mean;
            mean += delta / count as f64;
            m2 += delta * (value - mean);
        }
        if count == 0 {
            return None;
        }

        let std_dev = (m2 / count as f64).sqrt();
        let coefficient_of_variation = if mean == 0.0 {
            0.0
        } else {
            std_dev / mean.abs()
        };
        Some(Self {
            count,
            min,
            max,
            mean,
            std_dev,
            coefficient_of_variation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_none() {
        assert!(DescriptiveStats::new([]).is_none());
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([3.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert!((stats.min - 3.5).abs() < f64::EPSILON);
        assert!((stats.max - 3.5).abs() < f64::EPSILON);
        assert!(stats.std_dev.abs() < f64::EPSILON);
    }

    #[test]
    fn test_spread() {
        let stats = DescriptiveStats::new([10.0, 20.0, 30.0]).unwrap();
        assert!((stats.mean - 20.0).abs() < 1e-12);
        assert!((stats.std_dev - (200.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((stats.coefficient_of_variation - stats.std_dev / 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_mean() {
        let stats = DescriptiveStats::new([-1.0, 1.0]).unwrap();
        assert!(stats.coefficient_of_variation.abs() < f64::EPSILON);
    }
}
