use acsim_engine::{Weather, WeatherBand, WeatherBands, WeatherGenerator};

/// Heat and wetness bands used to describe a year's weather in words.
#[derive(Debug, Clone)]
pub struct WeatherNarrative {
    heat: WeatherBands,
    wetness: WeatherBands,
}

impl Default for WeatherNarrative {
    fn default() -> Self {
        let heat = [
            (-3.0, "This was a glacial year"),
            (-2.5, "This was a freezing year"),
            (-2.0, "This was a frigid year"),
            (-1.5, "This was a bracing year"),
            (-1.0, "This was a chilly year"),
            (-0.5, "This was a mild year"),
            (0.5, "This was a warm year"),
            (1.0, "This was a hot year"),
            (1.5, "This was a sultry year"),
            (2.0, "This was a sweltering year"),
            (2.5, "This was a scorching year"),
        ];
        let wetness = [
            (-3.0, "with an arid climate."),
            (-2.5, "with minimal precipitation."),
            (-2.0, "with scattered drizzle."),
            (-1.5, "with scarce rainfall."),
            (-1.0, "with light showers."),
            (-0.5, "with moderate rainfall."),
            (0.5, "with considerable precipitation."),
            (1.0, "with heavy rainfall."),
            (1.5, "with some squalling."),
            (2.0, "with torrential downpours."),
            (2.5, "with monsoon storms."),
        ];
        Self::new(bands(&heat), bands(&wetness))
    }
}

fn bands(table: &[(f64, &str)]) -> WeatherBands {
    WeatherBands::new(
        table
            .iter()
            .map(|&(threshold, message)| WeatherBand::new(threshold, message))
            .collect(),
    )
}

impl WeatherNarrative {
    pub fn new(heat: WeatherBands, wetness: WeatherBands) -> Self {
        Self { heat, wetness }
    }

    /// One sentence describing `weather` relative to the generator's spread.
    pub fn describe(&self, generator: &WeatherGenerator, weather: &Weather) -> String {
        let heat = self
            .heat
            .lookup(generator.heat_score(weather))
            .map_or("This was an unusual year", |band| band.message.as_str());
        let wetness = self
            .wetness
            .lookup(generator.wetness_score(weather))
            .map_or("with unusual rainfall.", |band| band.message.as_str());
        format!("{heat} {wetness}")
    }
}
