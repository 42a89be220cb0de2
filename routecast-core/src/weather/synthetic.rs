use anyhow::Result;
use async_trait::async_trait;
use fxhash::FxHasher64;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hash::Hasher;

use crate::model::{City, ObservationOrigin, WeatherObservation, icon_url};

use super::WeatherSource;

const DESCRIPTIONS: [&str; 4] = ["Sunny", "Cloudy", "Rainy", "Snowy"];

/// Placeholder weather for running without an OpenWeather key.
///
/// Values look plausible but mean nothing. Each city's values derive from the
/// source seed and the city name, so a seeded source always answers the same,
/// across runs and toolchain versions.
#[derive(Debug, Clone)]
pub struct SyntheticWeatherSource {
    seed: u64,
}

impl SyntheticWeatherSource {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, city: &City) -> StdRng {
        StdRng::seed_from_u64(city_seed(self.seed, &city.name))
    }
}

/// FxHash of the raw name bytes mixed into `seed`.
fn city_seed(seed: u64, name: &str) -> u64 {
    let mut hasher = FxHasher64::default();
    hasher.write(name.as_bytes());
    seed ^ hasher.finish()
}

impl Default for SyntheticWeatherSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherSource for SyntheticWeatherSource {
    fn origin(&self) -> ObservationOrigin {
        ObservationOrigin::Synthetic
    }

    async fn observe(&self, city: &City) -> Result<WeatherObservation> {
        let mut rng = self.rng_for(city);

        Ok(WeatherObservation {
            temperature_c: rng.random_range(10..40),
            feels_like_c: rng.random_range(10..40),
            description: DESCRIPTIONS[rng.random_range(0..DESCRIPTIONS.len())].to_string(),
            humidity_pct: rng.random_range(30..80),
            wind_speed_kmh: rng.random_range(5..25),
            icon_url: icon_url("01d"),
            origin: ObservationOrigin::Synthetic,
        })
    }
}
