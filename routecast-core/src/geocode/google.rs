use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    model::Coordinate,
    provider::{http_client, truncate_body},
};

use super::{AddressComponent, ReverseGeocoder, extract_city};

const GOOGLE_BASE_URL: &str = "https://maps.googleapis.com";

/// Reverse geocoder backed by the Google Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    http: Client,
    base_url: String,
}

impl GoogleGeocoder {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(GOOGLE_BASE_URL, timeout)
    }

    /// Point the geocoder at another host, e.g. a mock server.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn lookup(&self, point: Coordinate, api_key: &str) -> Result<Option<String>> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);
        let latlng = format!("{},{}", point.latitude, point.longitude);

        let res = self
            .http
            .get(&url)
            .query(&[("latlng", latlng.as_str()), ("key", api_key)])
            .send()
            .await
            // The request URL carries the API key; keep it out of error chains and logs.
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request to Google Geocoding")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read Google Geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Google Geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GeocodeResponse =
            serde_json::from_str(&body).context("Failed to parse Google Geocoding JSON")?;

        match parsed.status.as_str() {
            "OK" => Ok(parsed
                .results
                .first()
                .and_then(|best| extract_city(&best.address_components))),
            "ZERO_RESULTS" => {
                debug!(%point, "no geocoding results");
                Ok(None)
            }
            other => Err(anyhow!(
                "Google Geocoding returned status {}: {}",
                other,
                parsed.error_message.as_deref().unwrap_or("no error message"),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[async_trait]
impl ReverseGeocoder for GoogleGeocoder {
    async fn resolve_city(&self, point: Coordinate, api_key: &str) -> Option<String> {
        match self.lookup(point, api_key).await {
            Ok(city) => {
                debug!(%point, city = ?city, "reverse geocoded sample");
                city
            }
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(
                    %point,
                    error = %reason,
                    "reverse geocoding failed; treating sample as unresolved"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn transport_errors_do_not_leak_the_api_key() {
        // Nothing listens on port 1.
        let geocoder =
            GoogleGeocoder::with_base_url("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();

        let err = geocoder
            .lookup(Coordinate::new(51.0, -114.0), "SECRET_G_KEY")
            .await
            .unwrap_err();

        let reason = format!("{err:#}");
        assert!(reason.contains("Failed to send request to Google Geocoding"));
        assert!(!reason.contains("SECRET_G_KEY"), "key leaked: {reason}");
    }
}
