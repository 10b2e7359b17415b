use chrono::NaiveDateTime;

/// First geocoding candidate for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub resolved_name: String,
    pub country: Option<String>,
    pub timezone: Option<String>,
}

impl GeocodeResult {
    /// "Name, Country", or just the name when the country is missing or blank.
    pub fn display_name(&self) -> String {
        match self.country.as_deref().filter(|c| !c.is_empty()) {
            Some(country) => format!("{}, {}", self.resolved_name, country),
            None => self.resolved_name.clone(),
        }
    }
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub humidity_pct: f64,
    pub weather_code: i32,
    /// Wall-clock time in `timezone_id`.
    pub observed_at_local: NaiveDateTime,
    pub timezone_id: String,
}
