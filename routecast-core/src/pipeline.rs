//! Route → cities → weather orchestration.
//!
//! A call samples the route, reverse geocodes the samples with a bounded
//! fan-out, deduplicates the localities in route order and then looks up
//! weather for the finished city list.

use chrono::Utc;
use futures::{StreamExt, stream};
use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tracing::{debug, info};

use crate::{
    Config,
    dedupe::dedupe,
    error::PipelineError,
    geocode::{GoogleGeocoder, ReverseGeocoder},
    model::{City, CityList, Coordinate, RouteIntelligence, WeatherMap},
    provider::ProviderId,
    sampler::{DEFAULT_STEP, sample},
    weather::{DEFAULT_CONCURRENCY, WeatherAggregator, weather_source_from_config},
};

/// Identifies one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Hands out [`Generation`] tokens; only the newest one is current.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    latest: Arc<AtomicU64>,
}

impl GenerationCounter {
    pub fn advance(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn current(&self) -> Generation {
        Generation(self.latest.load(Ordering::SeqCst))
    }

    /// False once a newer invocation has started; its results should be dropped.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current() == generation
    }
}

#[derive(Debug, Clone)]
pub struct RoutePipeline {
    geocoder: Arc<dyn ReverseGeocoder>,
    weather: WeatherAggregator,
    concurrency: usize,
    step: usize,
    generations: GenerationCounter,
}

impl RoutePipeline {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>, weather: WeatherAggregator) -> Self {
        Self {
            geocoder,
            weather,
            concurrency: DEFAULT_CONCURRENCY,
            step: DEFAULT_STEP,
            generations: GenerationCounter::default(),
        }
    }

    /// Bound on in-flight geocoding requests.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Sampling stride used when the caller does not pick one.
    pub fn with_step(mut self, step: usize) -> Self {
        self.step = step.max(1);
        self
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Google geocoding plus whichever weather source `config` selects.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = config.pipeline.request_timeout();
        let geocoder = GoogleGeocoder::new(timeout)?;
        let weather = WeatherAggregator::new(weather_source_from_config(config)?)
            .with_concurrency(config.pipeline.concurrency)
            .with_request_timeout(timeout);

        Ok(Self::new(Arc::new(geocoder), weather)
            .with_concurrency(config.pipeline.concurrency)
            .with_step(config.pipeline.step))
    }

    pub fn generations(&self) -> &GenerationCounter {
        &self.generations
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generations.is_current(generation)
    }

    /// Distinct localities along `points`, in the order the route reaches them.
    ///
    /// Fails only when `api_key` is blank, before any geocoding request is made.
    pub async fn cities_along_route(
        &self,
        points: &[Coordinate],
        api_key: &str,
        step: usize,
    ) -> Result<CityList, PipelineError> {
        if api_key.trim().is_empty() {
            return Err(PipelineError::MissingCredential {
                provider: ProviderId::Google,
            });
        }

        let samples = sample(points, step);
        debug!(points = points.len(), samples = samples.len(), step, "sampled route");

        // `buffered` yields in input order, which dedupe relies on.
        let resolved: Vec<(Coordinate, Option<String>)> = stream::iter(samples)
            .map(|point| async move {
                let name = self.geocoder.resolve_city(point, api_key).await;
                (point, name)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let unresolved = resolved.iter().filter(|(_, name)| name.is_none()).count();
        let cities = dedupe(resolved);

        info!(cities = cities.len(), unresolved, "resolved cities along route");
        Ok(cities)
    }

    /// Weather for each city; see [`WeatherAggregator::fetch_all`].
    pub async fn weather_for(&self, cities: &[City]) -> WeatherMap {
        self.weather.fetch_all(cities).await
    }

    /// Cities and their weather for one route request.
    ///
    /// The result carries a fresh [`Generation`]; compare it with
    /// [`RoutePipeline::is_current`] before displaying it.
    pub async fn build_route_intelligence(
        &self,
        points: &[Coordinate],
        api_key: &str,
        step: usize,
    ) -> Result<RouteIntelligence, PipelineError> {
        let generation = self.generations.advance();

        let cities = self.cities_along_route(points, api_key, step).await?;
        let weather = self.weather_for(&cities).await;

        Ok(RouteIntelligence {
            generation,
            cities,
            weather,
            built_at: Utc::now(),
        })
    }
}
