use serde::{Deserialize, Serialize};

use crate::code::WeatherCode;

/// A geocoding candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub admin1: Option<String>,
}

impl Place {
    /// "name, region" when a region is known, otherwise just the name.
    pub fn label(&self) -> String {
        match self.admin1.as_deref() {
            Some(region) if !region.is_empty() => format!("{}, {}", self.name, region),
            _ => self.name.clone(),
        }
    }
}

/// Current conditions at a coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub weather_code: WeatherCode,
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherResult {
    pub location_label: String,
    pub temperature_c: i32,
    pub code: WeatherCode,
}

impl WeatherResult {
    pub fn from_lookup(place: &Place, current: &CurrentConditions) -> Self {
        Self {
            location_label: place.label(),
            temperature_c: round_half_up(current.temperature_c),
            code: current.weather_code,
        }
    }
}

// Halves go toward positive infinity: 18.5 -> 19, -2.5 -> -2.
fn round_half_up(value: f64) -> i32 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i32
}
