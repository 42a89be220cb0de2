//! Reverse geocoding of route samples into locality names.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;

use crate::model::Coordinate;

pub mod google;

pub use google::GoogleGeocoder;

/// Address component tag for a city or town.
pub const LOCALITY: &str = "locality";
/// Address component tag for a county or regional district.
pub const ADMIN_AREA_LEVEL_2: &str = "administrative_area_level_2";

#[async_trait]
pub trait ReverseGeocoder: Send + Sync + Debug {
    /// Name of the locality at `point`, or `None` when there is none or the
    /// lookup failed. Implementations log failures instead of returning them.
    async fn resolve_city(&self, point: Coordinate, api_key: &str) -> Option<String>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

/// Pick the city-level name out of the best-ranked result's components.
///
/// The first `locality` wins; without one the first `administrative_area_level_2`
/// is used, which resolves rural points to their county.
pub fn extract_city(components: &[AddressComponent]) -> Option<String> {
    components
        .iter()
        .find(|c| c.has_type(LOCALITY))
        .or_else(|| components.iter().find(|c| c.has_type(ADMIN_AREA_LEVEL_2)))
        .map(|c| c.long_name.clone())
}
