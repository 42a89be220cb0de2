use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::Generation;

/// A point on the earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// A locality resolved from one sampled route point.
///
/// Two cities are the same city when their names are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub coordinate: Coordinate,
}

/// Cities in the order they are first met along the route. Names are unique.
pub type CityList = Vec<City>;

/// Which path produced a [`WeatherObservation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationOrigin {
    /// Returned by the configured weather provider.
    Live,
    /// Fixed defaults substituted after a failed lookup.
    Fallback,
    /// Placeholder data; no weather provider is configured.
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_c: i32,
    pub feels_like_c: i32,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed_kmh: i32,
    pub icon_url: String,
    pub origin: ObservationOrigin,
}

impl WeatherObservation {
    /// The observation reported for a city whose lookup failed.
    pub fn fallback() -> Self {
        Self {
            temperature_c: 20,
            feels_like_c: 21,
            description: "Partly cloudy".to_string(),
            humidity_pct: 65,
            wind_speed_kmh: 12,
            icon_url: icon_url("02d"),
            origin: ObservationOrigin::Fallback,
        }
    }
}

/// Full URL of an OpenWeather condition icon.
pub fn icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{code}@2x.png")
}

/// Weather keyed by city name.
///
/// A missing name means the lookup failed or has not finished, not that the city has no weather.
pub type WeatherMap = BTreeMap<String, WeatherObservation>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeatherStatus<'a> {
    Ready(&'a WeatherObservation),
    Unavailable,
}

pub fn weather_status<'a>(weather: &'a WeatherMap, city: &str) -> WeatherStatus<'a> {
    weather
        .get(city)
        .map_or(WeatherStatus::Unavailable, WeatherStatus::Ready)
}

/// Everything one "get directions" request produces.
#[derive(Debug, Clone, Serialize)]
pub struct RouteIntelligence {
    pub generation: Generation,
    pub cities: CityList,
    pub weather: WeatherMap,
    pub built_at: DateTime<Utc>,
}
