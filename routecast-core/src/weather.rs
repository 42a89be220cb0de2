//! Weather lookups for the cities along a route.

use async_trait::async_trait;
use futures::{StreamExt, stream};
use std::{collections::HashSet, fmt::Debug, sync::Arc, time::Duration};
use tracing::{debug, info, warn};

use crate::{
    Config,
    model::{City, ObservationOrigin, WeatherMap, WeatherObservation},
    provider::ProviderId,
};

pub mod openweather;
pub mod synthetic;

pub use openweather::OpenWeatherSource;
pub use synthetic::SyntheticWeatherSource;

/// Simultaneous outbound requests per fan-out stage.
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Kind of data this source produces when a lookup succeeds.
    fn origin(&self) -> ObservationOrigin;

    async fn observe(&self, city: &City) -> anyhow::Result<WeatherObservation>;
}

/// Pick the weather source for `config`.
///
/// Without an OpenWeather key every city gets synthetic placeholder weather.
pub fn weather_source_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherSource>> {
    let timeout = config.pipeline.request_timeout();

    match config.provider_api_key(ProviderId::OpenWeather) {
        Some(key) if !key.trim().is_empty() => {
            Ok(Arc::new(OpenWeatherSource::new(key.to_owned(), timeout)?))
        }
        _ => {
            info!("no OpenWeather API key configured; serving synthetic weather");
            Ok(Arc::new(SyntheticWeatherSource::new()))
        }
    }
}

/// Fans weather lookups out over a city list and merges them by name.
#[derive(Debug, Clone)]
pub struct WeatherAggregator {
    source: Arc<dyn WeatherSource>,
    concurrency: usize,
    request_timeout: Duration,
}

impl WeatherAggregator {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self {
            source,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Weather for every city in `cities`.
    ///
    /// The returned map has exactly one entry per distinct city name; failed
    /// lookups are filled with [`WeatherObservation::fallback`].
    pub async fn fetch_all(&self, cities: &[City]) -> WeatherMap {
        let mut queued = HashSet::new();
        let mut unique = Vec::with_capacity(cities.len());
        for city in cities {
            if queued.insert(city.name.as_str()) {
                unique.push(city);
            }
        }

        let observations: Vec<(String, WeatherObservation)> = stream::iter(unique)
            .map(|city| async move {
                (city.name.clone(), self.observe_or_fallback(city).await)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        debug!(cities = observations.len(), "weather fan-out complete");
        observations.into_iter().collect()
    }

    async fn observe_or_fallback(&self, city: &City) -> WeatherObservation {
        match tokio::time::timeout(self.request_timeout, self.source.observe(city)).await {
            Ok(Ok(observation)) => observation,
            Ok(Err(e)) => {
                let reason = format!("{e:#}");
                warn!(
                    city = %city.name,
                    coordinate = %city.coordinate,
                    error = %reason,
                    "weather lookup failed; using fallback"
                );
                WeatherObservation::fallback()
            }
            Err(_) => {
                warn!(
                    city = %city.name,
                    coordinate = %city.coordinate,
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "weather lookup timed out; using fallback"
                );
                WeatherObservation::fallback()
            }
        }
    }
}
