//! Lookup request and result types.

use serde::{Deserialize, Serialize};

/// A validated postal-code lookup.
///
/// Outside the `lookup` module the only constructor is [`LookupRequest::from_json`],
/// so a value of this type holds exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupRequest {
    #[serde(rename = "cep")]
    pub(super) code: String,
}

impl LookupRequest {
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Locality resolved from a postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressResult {
    pub locality: String,
}

/// Current temperature for a place, in three units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(rename = "city")]
    pub place: String,
    #[serde(rename = "temp_C")]
    pub temp_celsius: f64,
    #[serde(rename = "temp_F")]
    pub temp_fahrenheit: f64,
    #[serde(rename = "temp_K")]
    pub temp_kelvin: f64,
}

impl WeatherResult {
    /// Build a result from a raw Celsius reading.
    ///
    /// Each unit is converted from the raw value first and rounded afterwards,
    /// so Fahrenheit and Kelvin never inherit the Celsius rounding error.
    pub fn from_celsius(place: impl Into<String>, celsius: f64) -> Self {
        Self {
            place: place.into(),
            temp_celsius: round_tenth(celsius),
            temp_fahrenheit: round_tenth(celsius * 1.8 + 32.0),
            temp_kelvin: round_tenth(celsius + 273.0),
        }
    }

    /// Human-readable one-liner recorded on the weather span.
    pub fn summary(&self) -> String {
        format!(
            "Weather in {}: {:.1}C, {:.1}F, {:.1}K",
            self.place, self.temp_celsius, self.temp_fahrenheit, self.temp_kelvin
        )
    }
}

/// Round to one decimal place through the decimal formatter (ties to even).
fn round_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
