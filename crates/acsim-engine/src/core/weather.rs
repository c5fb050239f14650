use rand::{Rng, distr::Distribution as _};
use rand_distr::Normal;

/// Standard deviation used for both weather components unless configured.
pub const DEFAULT_WEATHER_DEVIATION: f64 = 0.1;

/// Samples further than this many standard deviations from 1.0 are redrawn.
const SAMPLE_BOUND_IN_DEVIATIONS: f64 = 3.0;

/// One year of weather.
///
/// Both factors are multiplicative deviations around 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weather {
    pub heat: f64,
    pub wetness: f64,
}

impl Weather {
    pub const IDEAL: Self = Self::new(1.0, 1.0);

    #[must_use]
    pub const fn new(heat: f64, wetness: f64) -> Self {
        Self { heat, wetness }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum WeatherError {
    #[display("weather deviation must be finite and non-negative, got {deviation}")]
    InvalidDeviation { deviation: f64 },
}

/// Generates yearly [`Weather`] samples.
///
/// Heat and wetness are drawn independently from `N(1.0, σ²)` and rejection
/// sampled into `[1 - 3σ, 1 + 3σ]`, keeping the bell shape while ruling out
/// extreme years.
///
/// # Example
///
/// ```
/// use acsim_engine::WeatherGenerator;
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let generator = WeatherGenerator::default();
/// let mut rng = Pcg32::seed_from_u64(7);
/// let weather = generator.generate(&mut rng);
/// assert!((0.7..=1.3).contains(&weather.heat));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WeatherGenerator {
    heat_deviation: f64,
    wetness_deviation: f64,
    heat: Normal<f64>,
    wetness: Normal<f64>,
}

impl Default for WeatherGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_WEATHER_DEVIATION, DEFAULT_WEATHER_DEVIATION)
            .expect("default deviation is valid")
    }
}

impl WeatherGenerator {
    pub fn new(heat_deviation: f64, wetness_deviation: f64) -> Result<Self, WeatherError> {
        Ok(Self {
            heat_deviation,
            wetness_deviation,
            heat: centered_normal(heat_deviation)?,
            wetness: centered_normal(wetness_deviation)?,
        })
    }

    #[must_use]
    pub fn heat_deviation(&self) -> f64 {
        self.heat_deviation
    }

    #[must_use]
    pub fn wetness_deviation(&self) -> f64 {
        self.wetness_deviation
    }

    pub fn generate<R>(&self, rng: &mut R) -> Weather
    where
        R: Rng + ?Sized,
    {
        let heat = sample_bounded(&self.heat, self.heat_deviation, rng);
        let wetness = sample_bounded(&self.wetness, self.wetness_deviation, rng);
        Weather { heat, wetness }
    }

    /// Heat deviation from 1.0 in units of standard deviation.
    #[must_use]
    pub fn heat_score(&self, weather: &Weather) -> f64 {
        standardize(weather.heat, self.heat_deviation)
    }

    /// Wetness deviation from 1.0 in units of standard deviation.
    #[must_use]
    pub fn wetness_score(&self, weather: &Weather) -> f64 {
        standardize(weather.wetness, self.wetness_deviation)
    }
}

fn centered_normal(deviation: f64) -> Result<Normal<f64>, WeatherError> {
    if !deviation.is_finite() || deviation < 0.0 {
        return Err(WeatherError::InvalidDeviation { deviation });
    }
    Normal::new(1.0, deviation).map_err(|_| WeatherError::InvalidDeviation { deviation })
}

fn sample_bounded<R>(normal: &Normal<f64>, deviation: f64, rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    let bound = SAMPLE_BOUND_IN_DEVIATIONS * deviation;
    loop {
        let value = normal.sample(rng);
        if (value - 1.0).abs() <= bound {
            return value;
        }
    }
}

fn standardize(value: f64, deviation: f64) -> f64 {
    if deviation == 0.0 {
        0.0
    } else {
        (value - 1.0) / deviation
    }
}

/// A narrative threshold used when describing a year's weather.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherBand {
    pub threshold: f64,
    pub message: String,
}

impl WeatherBand {
    #[must_use]
    pub fn new(threshold: f64, message: impl Into<String>) -> Self {
        Self {
            threshold,
            message: message.into(),
        }
    }
}

/// Ordered set of [`WeatherBand`]s for one weather component.
#[derive(Debug, Clone, Default)]
pub struct WeatherBands {
    bands: Vec<WeatherBand>,
}

impl WeatherBands {
    #[must_use]
    pub fn new(mut bands: Vec<WeatherBand>) -> Self {
        bands.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { bands }
    }

    /// Returns the band with the highest threshold not exceeding `score`.
    #[must_use]
    pub fn lookup(&self, score: f64) -> Option<&WeatherBand> {
        let end = self.bands.partition_point(|band| band.threshold <= score);
        end.checked_sub(1).map(|i| &self.bands[i])
    }
}
