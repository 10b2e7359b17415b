//! Core library for the `cityweather` tool.
//!
//! This crate defines:
//! - Search query validation and the WMO weather-code table
//! - Abstractions over the geocoding and current-weather services, with an
//!   Open-Meteo implementation
//! - The view model a host renders, and the controller that drives it
//! - Configuration handling
//!
//! It is used by `cityweather-cli`, but any host that can render a
//! [`ViewState`] and forward submit/reset/input events can drive it.

pub mod codes;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;
pub mod view;

pub use codes::{UNKNOWN_WEATHER, WEATHER_CODES, WeatherCodeTable, describe};
pub use config::Config;
pub use controller::WeatherLookupController;
pub use error::LookupError;
pub use model::{GeocodeResult, WeatherObservation};
pub use provider::{CurrentConditions, Geocoder, OpenMeteoProvider};
pub use query::SearchQuery;
pub use view::{Status, ViewState, ViewSurface, WeatherDisplay};

/// Controller wired to Open-Meteo for both lookups.
pub type OpenMeteoController<S> = WeatherLookupController<OpenMeteoProvider, OpenMeteoProvider, S>;

/// Build an [`OpenMeteoController`] from `config`, rendering into `surface`.
pub fn open_meteo_controller<S: ViewSurface>(
    config: &Config,
    surface: S,
) -> Result<OpenMeteoController<S>, LookupError> {
    let provider = OpenMeteoProvider::from_config(config)?;
    Ok(WeatherLookupController::new(provider.clone(), provider, surface, config.language.clone()))
}
