//! WMO weather code descriptions.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

/// Returned for any code the table does not list.
pub const UNKNOWN_WEATHER: &str = "unknown weather";

/// One rule of the table: every code in `codes` maps to `description`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRule {
    pub codes: &'static [i32],
    pub description: &'static str,
}

/// Ordered list of rules, consulted by first match.
#[derive(Debug, Clone, Copy)]
pub struct WeatherCodeTable {
    rules: &'static [CodeRule],
}

const fn rule(codes: &'static [i32], description: &'static str) -> CodeRule {
    CodeRule { codes, description }
}

const RULES: &[CodeRule] = &[
    rule(&[0], "clear"),
    rule(&[1, 2, 3], "cloudy"),
    rule(&[45, 48], "fog"),
    rule(&[51, 53, 55], "drizzle"),
    rule(&[56, 57], "freezing drizzle"),
    rule(&[61, 63, 65], "rain (light–heavy)"),
    rule(&[66, 67], "freezing rain"),
    rule(&[71, 73, 75], "snow (light–heavy)"),
    rule(&[77], "snow grains"),
    rule(&[80, 81, 82], "rain showers"),
    rule(&[85, 86], "snow showers"),
    rule(&[95], "thunderstorm"),
    rule(&[96, 99], "thunderstorm with hail"),
];

pub static WEATHER_CODES: WeatherCodeTable = WeatherCodeTable { rules: RULES };

impl WeatherCodeTable {
    pub const fn new(rules: &'static [CodeRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [CodeRule] {
        self.rules
    }

    /// Description of the first rule containing `code`, or [`UNKNOWN_WEATHER`].
    pub fn describe(&self, code: i32) -> &'static str {
        self.rules
            .iter()
            .find(|r| r.codes.contains(&code))
            .map(|r| r.description)
            .unwrap_or(UNKNOWN_WEATHER)
    }
}

/// Shorthand for [`WEATHER_CODES`]`.describe(code)`.
pub fn describe(code: i32) -> &'static str {
    WEATHER_CODES.describe(code)
}
