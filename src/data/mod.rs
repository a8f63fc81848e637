//! Core data models for Skycast
//!
//! This module contains the data types used throughout the application for
//! representing places, current conditions, forecasts, and air quality, along
//! with the OpenWeatherMap client that produces them.

pub mod air_quality;
pub mod geocoding;
pub mod weather;

pub use weather::{fetch_report, OpenWeatherClient, WeatherApi, WeatherError};

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A named, geolocated point used to anchor a weather query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Human-readable name of the place
    pub name: String,
    /// ISO 3166 country code
    pub country: String,
    /// Location of the place
    pub coordinates: Coordinates,
}

impl Place {
    /// Returns the `"{name}, {country}"` label shown above current conditions
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Broad weather categories used to pick a glyph for a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionKind {
    Clear,
    FewClouds,
    Cloudy,
    Rain,
    Showers,
    Thunderstorm,
    Snow,
    Mist,
}

/// A weather category as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Provider icon code such as `"10d"`
    pub icon: String,
    /// Free-text description such as `"light rain"`
    pub description: String,
}

impl WeatherCondition {
    pub fn new(icon: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            description: description.into(),
        }
    }

    /// Maps the icon code to a broad condition category
    pub fn kind(&self) -> ConditionKind {
        icon_to_kind(&self.icon)
    }
}

/// Map an OpenWeatherMap icon code to a ConditionKind
///
/// Icon codes are a two-digit group followed by `d` (day) or `n` (night):
/// - 01: Clear sky
/// - 02: Few clouds
/// - 03, 04: Scattered/broken clouds
/// - 09: Shower rain
/// - 10: Rain
/// - 11: Thunderstorm
/// - 13: Snow
/// - 50: Mist
pub fn icon_to_kind(icon: &str) -> ConditionKind {
    match icon.get(..2) {
        Some("01") => ConditionKind::Clear,
        Some("02") => ConditionKind::FewClouds,
        Some("09") => ConditionKind::Showers,
        Some("10") => ConditionKind::Rain,
        Some("11") => ConditionKind::Thunderstorm,
        Some("13") => ConditionKind::Snow,
        Some("50") => ConditionKind::Mist,
        _ => ConditionKind::Cloudy, // 03, 04 and anything unknown
    }
}

/// Current weather at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Station name reported by the provider
    pub name: String,
    /// Country code reported by the provider
    pub country: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Sunrise as a unix timestamp
    pub sunrise: i64,
    /// Sunset as a unix timestamp
    pub sunset: i64,
    /// Offset from UTC in seconds
    pub timezone_offset: i32,
    /// Current weather category
    pub condition: WeatherCondition,
}

/// One 3-hour forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Sample time as a unix timestamp
    pub timestamp: i64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Minimum temperature in Celsius
    pub temp_min: f64,
    /// Maximum temperature in Celsius
    pub temp_max: f64,
    /// Weather category for the sample
    pub condition: WeatherCondition,
}

/// A multi-day forecast for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Forecast samples in chronological order
    pub entries: Vec<ForecastEntry>,
    /// Offset from UTC in seconds for the forecast city
    pub timezone_offset: i32,
}

/// Air quality for the current hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySample {
    /// Air quality index, 1 (good) to 5 (very poor)
    pub aqi: u8,
    /// PM2.5 concentration in µg/m³
    pub pm2_5: f64,
    /// PM10 concentration in µg/m³
    pub pm10: f64,
    /// Ozone concentration in µg/m³
    pub o3: f64,
    /// Nitrogen dioxide concentration in µg/m³
    pub no2: f64,
}

/// Everything fetched for one screen update
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Forecast,
    pub air_quality: AirQualitySample,
}
