//! What the user sees, and how a lookup result is projected onto it.
//!
//! The controller is the only writer of [`ViewState`]. Hosts get a read-only
//! snapshot through [`ViewSurface::render`] after every change.

use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use tracing::warn;

use crate::{
    codes,
    model::{GeocodeResult, WeatherObservation},
};

pub const SUCCESS_MESSAGE: &str = "lookup succeeded";

pub fn in_progress_message(city: &str) -> String {
    format!("looking up the weather for '{city}', please wait...")
}

/// The status line: text plus an error flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_error: false }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_error: true }
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

/// The eight result fields, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherDisplay {
    pub city: String,
    pub temperature: String,
    pub apparent_temperature: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub humidity: String,
    pub description: String,
    pub observed_at: String,
}

impl WeatherDisplay {
    pub fn project(place: &GeocodeResult, obs: &WeatherObservation, language: &str) -> Self {
        let display_tz = place
            .timezone
            .as_deref()
            .filter(|tz| !tz.is_empty())
            .unwrap_or(&obs.timezone_id);

        Self {
            city: place.display_name(),
            temperature: format_whole(obs.temperature_c),
            apparent_temperature: format_whole(obs.apparent_temperature_c),
            wind_speed: format_tenths(obs.wind_speed_kmh),
            wind_direction: format_whole(obs.wind_direction_deg),
            humidity: obs.humidity_pct.to_string(),
            description: codes::describe(obs.weather_code).to_string(),
            observed_at: format_observation_time(
                obs.observed_at_local,
                &obs.timezone_id,
                display_tz,
                language,
            ),
        }
    }
}

/// Everything currently shown.
///
/// `result` is `None` while the result panel is hidden, so a half-filled
/// panel cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Contents of the city input field.
    pub input: String,
    pub status: Status,
    pub result: Option<WeatherDisplay>,
}

impl ViewState {
    pub fn is_result_visible(&self) -> bool {
        self.result.is_some()
    }

    pub fn clear_result(&mut self) {
        self.result = None;
    }

    pub fn clear_status(&mut self) {
        self.status = Status::default();
    }
}

/// Host-side display. Called with a snapshot after every view change.
pub trait ViewSurface: Send + Sync {
    fn render(&self, view: &ViewState);
}

/// Round half toward positive infinity, then drop the fraction.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// One decimal place, exact ties rounded away from zero.
///
/// A binary double sits exactly halfway between two tenths only when it is an
/// odd multiple of 0.25; every other value is already rounded correctly by `{:.1}`.
pub fn format_tenths(value: f64) -> String {
    let quarters = value.abs() * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let magnitude = round_half_up(value.abs() * 10.0) / 10.0;
        return format!("{:.1}", magnitude.copysign(value));
    }
    format!("{value:.1}")
}

fn format_whole(value: f64) -> String {
    let rounded = round_half_up(value);
    // avoids printing "-0"
    if rounded == 0.0 { "0".to_string() } else { rounded.to_string() }
}

/// 24-hour layout for a language tag such as `en`, `zh-CN` or `de`.
pub fn timestamp_layout(language: &str) -> &'static str {
    let primary = language.split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();
    match primary.as_str() {
        "zh" | "ja" => "%Y/%-m/%-d %H:%M:%S",
        "en" => "%-m/%-d/%Y, %H:%M:%S",
        "de" => "%-d.%-m.%Y, %H:%M:%S",
        _ => "%Y-%m-%d %H:%M:%S",
    }
}

/// Render provider wall-clock time `observed` (in `source_tz`) in `display_tz`.
///
/// Unknown zone names fall back to the source zone, then to UTC.
pub fn format_observation_time(
    observed: NaiveDateTime,
    source_tz: &str,
    display_tz: &str,
    language: &str,
) -> String {
    let layout = timestamp_layout(language);

    let source = source_tz.parse::<Tz>().unwrap_or_else(|_| {
        warn!(timezone = source_tz, "unknown source timezone, assuming UTC");
        Tz::UTC
    });

    let display = display_tz.parse::<Tz>().unwrap_or_else(|_| {
        warn!(timezone = display_tz, "unknown display timezone, using {}", source.name());
        source
    });

    match source.from_local_datetime(&observed).earliest() {
        Some(instant) => instant.with_timezone(&display).format(layout).to_string(),
        // wall time skipped by a DST jump; show it as reported
        None => observed.format(layout).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid datetime")
    }

    fn tokyo() -> (GeocodeResult, WeatherObservation) {
        let place = GeocodeResult {
            latitude: 35.68,
            longitude: 139.69,
            resolved_name: "Tokyo".into(),
            country: Some("Japan".into()),
            timezone: Some("Asia/Tokyo".into()),
        };
        let obs = WeatherObservation {
            temperature_c: 21.4,
            apparent_temperature_c: 20.9,
            wind_speed_kmh: 3.26,
            wind_direction_deg: 187.0,
            humidity_pct: 55.0,
            weather_code: 3,
            observed_at_local: at(2024, 5, 1, 12, 0),
            timezone_id: "Asia/Tokyo".into(),
        };
        (place, obs)
    }

    #[test]
    fn projects_tokyo_observation() {
        let (place, obs) = tokyo();
        let display = WeatherDisplay::project(&place, &obs, "en");

        assert_eq!(display.city, "Tokyo, Japan");
        assert_eq!(display.temperature, "21");
        assert_eq!(display.apparent_temperature, "21");
        assert_eq!(display.wind_speed, "3.3");
        assert_eq!(display.wind_direction, "187");
        assert_eq!(display.humidity, "55");
        assert_eq!(display.description, "cloudy");
        assert_eq!(display.observed_at, "5/1/2024, 12:00:00");
    }

    #[test]
    fn missing_geocoder_timezone_uses_weather_timezone() {
        let (mut place, mut obs) = tokyo();
        place.timezone = None;
        obs.timezone_id = "Europe/Berlin".into();

        let display = WeatherDisplay::project(&place, &obs, "de");
        assert_eq!(display.observed_at, "1.5.2024, 12:00:00");
    }

    #[test]
    fn converts_between_timezones() {
        // 12:00 in Tokyo (UTC+9) is 05:00 in Berlin (UTC+2 in May)
        let s = format_observation_time(at(2024, 5, 1, 12, 0), "Asia/Tokyo", "Europe/Berlin", "zh");
        assert_eq!(s, "2024/5/1 05:00:00");
    }

    #[test]
    fn unknown_display_timezone_falls_back_to_source() {
        let s = format_observation_time(at(2024, 5, 1, 12, 0), "Asia/Tokyo", "Mars/Olympus", "fr");
        assert_eq!(s, "2024-05-01 12:00:00");
    }

    #[test]
    fn rounds_half_toward_positive_infinity() {
        assert_eq!(format_whole(2.5), "3");
        assert_eq!(format_whole(-2.5), "-2");
        assert_eq!(format_whole(-0.4), "0");
        assert_eq!(format_whole(359.6), "360");
    }

    #[test]
    fn round_half_up_is_exact_below_half() {
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
    }

    #[test]
    fn wind_speed_ties_round_up() {
        assert_eq!(format_tenths(0.25), "0.3");
        assert_eq!(format_tenths(3.25), "3.3");
        assert_eq!(format_tenths(0.75), "0.8");
        assert_eq!(format_tenths(-0.25), "-0.3");
    }

    #[test]
    fn wind_speed_non_ties_use_nearest_tenth() {
        assert_eq!(format_tenths(3.26), "3.3");
        assert_eq!(format_tenths(1.15), "1.1");
        assert_eq!(format_tenths(1.05), "1.1");
        assert_eq!(format_tenths(12.0), "12.0");
    }

    #[test]
    fn projected_wind_speed_rounds_ties_up() {
        let (place, mut obs) = tokyo();
        obs.wind_speed_kmh = 3.25;
        assert_eq!(WeatherDisplay::project(&place, &obs, "en").wind_speed, "3.3");
    }

    #[test]
    fn humidity_shown_as_reported() {
        let (place, mut obs) = tokyo();
        obs.humidity_pct = 55.5;
        assert_eq!(WeatherDisplay::project(&place, &obs, "en").humidity, "55.5");
    }

    #[test]
    fn unknown_code_gets_sentinel() {
        let (place, mut obs) = tokyo();
        obs.weather_code = 42;
        assert_eq!(WeatherDisplay::project(&place, &obs, "en").description, codes::UNKNOWN_WEATHER);
    }

    #[test]
    fn layout_uses_primary_language_subtag() {
        assert_eq!(timestamp_layout("zh-CN"), timestamp_layout("zh"));
        assert_eq!(timestamp_layout("EN_us"), timestamp_layout("en"));
    }

    #[test]
    fn default_view_is_cleared() {
        let view = ViewState::default();
        assert!(!view.is_result_visible());
        assert!(view.status.is_empty());
        assert!(view.input.is_empty());
    }
}
