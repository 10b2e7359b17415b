use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::LookupError,
    model::{GeocodeResult, WeatherObservation},
    query::SearchQuery,
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// Resolves a city name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` when the service answered but found no candidate.
    async fn geocode(&self, query: &SearchQuery) -> Result<Option<GeocodeResult>, LookupError>;
}

/// Fetches current conditions for resolved coordinates.
#[async_trait]
pub trait CurrentConditions: Send + Sync + Debug {
    /// `Ok(None)` when the service answered without current conditions.
    async fn current(&self, place: &GeocodeResult)
    -> Result<Option<WeatherObservation>, LookupError>;
}
