//! Core library for the `routecast` CLI.
//!
//! This crate defines:
//! - Route sampling and order-preserving city deduplication
//! - Reverse geocoding and weather provider adapters
//! - The route pipeline that turns route points into cities and weather
//! - Configuration & credentials handling
//!
//! It is used by `routecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod dedupe;
pub mod error;
pub mod geocode;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod sampler;
pub mod weather;

pub use config::{Config, PipelineConfig, ProviderConfig};
pub use error::PipelineError;
pub use model::{
    City, CityList, Coordinate, ObservationOrigin, RouteIntelligence, WeatherMap,
    WeatherObservation,
};
pub use pipeline::{Generation, GenerationCounter, RoutePipeline};
pub use provider::ProviderId;
