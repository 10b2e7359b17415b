use thiserror::Error;

/// Shown when an unexpected failure carries no message of its own.
pub const GENERIC_FAILURE: &str = "something went wrong, please try again";

/// Every way a lookup can end without a rendered result.
///
/// `Display` is the exact text put on the status line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("please enter a city name")]
    EmptyQuery,

    #[error("geocoding service unavailable")]
    GeocodingUnavailable,

    /// Not a fault: the geocoder answered, it just had no candidates.
    #[error("no city found matching '{0}', try a different spelling")]
    CityNotFound(String),

    #[error("weather service unavailable")]
    WeatherUnavailable,

    /// Not a fault: the weather service answered without a `current` block.
    #[error("no weather data available, try again later")]
    NoWeatherData,

    #[error("{}", unexpected_text(.0))]
    Unexpected(String),
}

fn unexpected_text(msg: &str) -> &str {
    if msg.is_empty() { GENERIC_FAILURE } else { msg }
}

impl LookupError {
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        LookupError::Unexpected(err.to_string())
    }

    /// Text for the status line.
    pub fn status_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_the_city() {
        let msg = LookupError::CityNotFound("Atlantis".into()).status_message();
        assert_eq!(msg, "no city found matching 'Atlantis', try a different spelling");
    }

    #[test]
    fn unexpected_without_message_falls_back_to_generic() {
        assert_eq!(LookupError::Unexpected(String::new()).status_message(), GENERIC_FAILURE);
        assert_eq!(LookupError::unexpected("connection refused").status_message(), "connection refused");
    }
}
