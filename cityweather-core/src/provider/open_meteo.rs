use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Config,
    error::LookupError,
    model::{GeocodeResult, WeatherObservation},
    query::SearchQuery,
};

use super::{CurrentConditions, Geocoder};

const USER_AGENT: &str = concat!("cityweather/", env!("CARGO_PKG_VERSION"));

/// Fields requested from the `current` block, in request order.
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,wind_speed_10m,wind_direction_10m,weather_code";

/// Timezone Open-Meteo reports when none is resolved.
const FALLBACK_TIMEZONE: &str = "GMT";

/// Open-Meteo geocoding and forecast APIs. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    config: Config,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(config: Config) -> Result<Self, LookupError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(LookupError::unexpected)?;

        Ok(Self { config, http })
    }

    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        Self::new(config.clone())
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResponse {
    #[serde(default)]
    results: Option<Vec<OmPlace>>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    latitude: f64,
    longitude: f64,
    name: String,
    country: Option<String>,
    timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: Option<OmCurrent>,
    timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: String,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
    weather_code: i32,
}

#[async_trait]
impl Geocoder for OpenMeteoProvider {
    async fn geocode(&self, query: &SearchQuery) -> Result<Option<GeocodeResult>, LookupError> {
        debug!(city = %query, url = %self.config.geocode_url, "geocoding");

        let res = self
            .http
            .get(&self.config.geocode_url)
            .query(&[
                ("name", query.as_str()),
                ("count", "1"),
                ("language", self.config.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(LookupError::unexpected)?;

        let status = res.status();
        let body = res.text().await.map_err(LookupError::unexpected)?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "geocoding request failed");
            return Err(LookupError::GeocodingUnavailable);
        }

        let parsed: OmGeocodeResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::Unexpected(format!("malformed geocoding response: {e}")))?;

        let place = parsed.results.and_then(|r| r.into_iter().next()).map(|p| GeocodeResult {
            latitude: p.latitude,
            longitude: p.longitude,
            resolved_name: p.name,
            country: p.country,
            timezone: p.timezone,
        });

        if let Some(place) = &place {
            debug!(
                "Found location: {} ({:.4}, {:.4})",
                place.resolved_name, place.latitude, place.longitude
            );
        }

        Ok(place)
    }
}

#[async_trait]
impl CurrentConditions for OpenMeteoProvider {
    async fn current(
        &self,
        place: &GeocodeResult,
    ) -> Result<Option<WeatherObservation>, LookupError> {
        let latitude = place.latitude.to_string();
        let longitude = place.longitude.to_string();
        debug!(%latitude, %longitude, url = %self.config.weather_url, "fetching current conditions");

        let res = self
            .http
            .get(&self.config.weather_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(LookupError::unexpected)?;

        let status = res.status();
        let body = res.text().await.map_err(LookupError::unexpected)?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "weather request failed");
            return Err(LookupError::WeatherUnavailable);
        }

        let parsed: OmForecastResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::Unexpected(format!("malformed weather response: {e}")))?;

        let Some(current) = parsed.current else {
            return Ok(None);
        };

        let observed_at_local = parse_observation_time(&current.time).ok_or_else(|| {
            LookupError::Unexpected(format!("invalid observation time '{}'", current.time))
        })?;

        Ok(Some(WeatherObservation {
            temperature_c: current.temperature_2m,
            apparent_temperature_c: current.apparent_temperature,
            wind_speed_kmh: current.wind_speed_10m,
            wind_direction_deg: current.wind_direction_10m,
            humidity_pct: current.relative_humidity_2m,
            weather_code: current.weather_code,
            observed_at_local,
            timezone_id: parsed.timezone.unwrap_or_else(|| FALLBACK_TIMEZONE.to_string()),
        }))
    }
}

/// Open-Meteo sends `2024-05-01T12:00`; seconds are accepted too.
fn parse_observation_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
