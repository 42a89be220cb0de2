use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    model::{City, ObservationOrigin, WeatherObservation, icon_url},
    provider::{http_client, truncate_body},
};

use super::WeatherSource;

const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

/// Live current-weather lookups against OpenWeather.
#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherSource {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL, timeout)
    }

    pub fn with_base_url(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            api_key,
            http: http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_current(&self, city: &City) -> Result<WeatherObservation> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let lat = city.coordinate.latitude.to_string();
        let lon = city.coordinate.longitude.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            // The request URL carries the API key; keep it out of error chains and logs.
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to send request to OpenWeather for {}", city.name))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read OpenWeather current response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        parsed.into_observation()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    /// Meters per second when `units=metric`.
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_observation(self) -> Result<WeatherObservation> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("OpenWeather response contained no weather condition"))?;

        Ok(WeatherObservation {
            temperature_c: self.main.temp.round() as i32,
            feels_like_c: self.main.feels_like.round() as i32,
            description: condition.description,
            humidity_pct: self.main.humidity,
            wind_speed_kmh: (self.wind.speed * 3.6).round() as i32,
            icon_url: icon_url(&condition.icon),
            origin: ObservationOrigin::Live,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    fn origin(&self) -> ObservationOrigin {
        ObservationOrigin::Live
    }

    async fn observe(&self, city: &City) -> Result<WeatherObservation> {
        self.fetch_current(city).await
    }
}
