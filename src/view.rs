//! View models for the dashboard panels
//!
//! Pure transformations from fetched data into the strings and values each
//! panel displays. Nothing here touches the terminal; `ui` draws these models
//! and `dashboard` hands them over.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::data::{
    AirQualitySample, Coordinates, CurrentConditions, Forecast, ForecastEntry, WeatherCondition,
};

/// Number of forecast entries shown in the hourly strip (3-hour cadence, 24h)
pub const HOURLY_ENTRIES: usize = 8;

/// Number of day cards shown in the daily panel
pub const DAILY_CARDS: usize = 5;

/// Zoom level of the map tile
pub const MAP_ZOOM: u8 = 8;

/// Map layer id of the air temperature overlay
const MAP_LAYER: &str = "TA2";

/// Root of the map tile service
const MAP_BASE_URL: &str = "https://maps.openweathermap.org/maps/2.0/weather";

/// Overlay opacity and palette, passed through to the tile service as-is
const MAP_STYLE: &str = "opacity=0.9&fill_bound=true&palette=-65:821cca;-55:9c8cfc;-42:769cff;-28:76cff0;-10:89e3ce;10:95f0a3;32:f6ff8e;43:ffc140;54:ff6b6b;66:d837f5;70:8b2fcc";

/// AQI colors for indices 1 (good) through 5 (very poor)
pub const AQI_COLORS: [&str; 5] = ["#00e400", "#ffff00", "#ff7e00", "#ff0000", "#8f3f97"];

/// Color used for an AQI outside 1..=5
pub const AQI_FALLBACK_COLOR: &str = "#666666";

/// Unit suffix for pollutant concentrations
const CONCENTRATION_UNIT: &str = "µg/m³";

/// Current-conditions panel
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    /// `"{name}, {country}"`
    pub place: String,
    /// Long-form date for today, e.g. `"Monday, October 19, 2026"`
    pub date: String,
    pub condition: WeatherCondition,
    /// Rounded temperature in Celsius
    pub temperature: i64,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub sunrise: String,
    pub sunset: String,
}

/// One slot of the hourly strip
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyItem {
    /// Hour label such as `"3 PM"`
    pub hour: String,
    pub condition: WeatherCondition,
    /// Rounded temperature in Celsius
    pub temperature: i64,
}

/// One day card
#[derive(Debug, Clone, PartialEq)]
pub struct DailyItem {
    /// Short weekday name such as `"Mon"`
    pub day: String,
    /// Condition of the first entry seen for the day
    pub condition: WeatherCondition,
    /// Lowest minimum seen for the day
    pub temp_min: f64,
    /// Highest maximum seen for the day
    pub temp_max: f64,
}

/// Air-quality panel
#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityView {
    pub aqi: u8,
    /// Hex color for the index
    pub color: &'static str,
    pub label: &'static str,
    pub pm2_5: String,
    pub pm10: String,
    pub o3: String,
    pub no2: String,
}

/// Map panel
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub coordinates: Coordinates,
    pub zoom: u8,
    /// Tile image URL
    pub url: String,
}

/// Rounds to the nearest integer, with halves going up (toward +∞)
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Converts m/s to rounded km/h
pub fn wind_kmh(meters_per_second: f64) -> i64 {
    round_half_up(meters_per_second * 3.6)
}

/// Shifts a unix timestamp into a fixed UTC offset
fn local_time(timestamp: i64, offset_seconds: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset_seconds)?;
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&offset))
}

/// Formats a timestamp as `hh:mm AM/PM` at the given offset
pub fn clock_time(timestamp: i64, offset_seconds: i32) -> String {
    local_time(timestamp, offset_seconds)
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Formats a timestamp as an hour label such as `"3 PM"`
pub fn hour_label(timestamp: i64, offset_seconds: i32) -> String {
    local_time(timestamp, offset_seconds)
        .map(|t| t.format("%-I %p").to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// Short weekday name (`"Mon"`) of a timestamp at the given offset
pub fn weekday_short(timestamp: i64, offset_seconds: i32) -> String {
    local_time(timestamp, offset_seconds)
        .map(|t| t.format("%a").to_string())
        .unwrap_or_default()
}

/// Long-form date such as `"Monday, October 19, 2026"`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Builds the current-conditions panel
pub fn current_view(place: &str, current: &CurrentConditions, today: NaiveDate) -> CurrentView {
    CurrentView {
        place: place.to_string(),
        date: long_date(today),
        condition: current.condition.clone(),
        temperature: round_half_up(current.temperature),
        feels_like: format!("{}°C", round_half_up(current.feels_like)),
        humidity: format!("{}%", current.humidity),
        wind: format!("{} km/h", wind_kmh(current.wind_speed)),
        pressure: format!("{} hPa", current.pressure),
        sunrise: clock_time(current.sunrise, current.timezone_offset),
        sunset: clock_time(current.sunset, current.timezone_offset),
    }
}

/// Builds the hourly strip from the first entries of the forecast
pub fn hourly_view(forecast: &Forecast) -> Vec<HourlyItem> {
    forecast
        .entries
        .iter()
        .take(HOURLY_ENTRIES)
        .map(|entry| HourlyItem {
            hour: hour_label(entry.timestamp, forecast.timezone_offset),
            condition: entry.condition.clone(),
            temperature: round_half_up(entry.temperature),
        })
        .collect()
}

/// Builds the day cards, grouping entries by short weekday name
pub fn daily_view(forecast: &Forecast) -> Vec<DailyItem> {
    fold_days(forecast.entries.iter().map(|entry| {
        (
            weekday_short(entry.timestamp, forecast.timezone_offset),
            entry,
        )
    }))
}

/// Folds labelled entries into day cards
///
/// Groups keep first-encountered order and are keyed by label alone, so two
/// non-adjacent days with the same weekday name share a card. At most
/// `DAILY_CARDS` groups are returned.
pub fn fold_days<'a, I>(labelled: I) -> Vec<DailyItem>
where
    I: IntoIterator<Item = (String, &'a ForecastEntry)>,
{
    let mut days: Vec<DailyItem> = Vec::new();

    for (label, entry) in labelled {
        match days.iter_mut().find(|day| day.day == label) {
            Some(day) => {
                if entry.temp_min < day.temp_min {
                    day.temp_min = entry.temp_min;
                }
                if entry.temp_max > day.temp_max {
                    day.temp_max = entry.temp_max;
                }
            }
            None => days.push(DailyItem {
                day: label,
                condition: entry.condition.clone(),
                temp_min: entry.temp_min,
                temp_max: entry.temp_max,
            }),
        }
    }

    days.truncate(DAILY_CARDS);
    days
}

/// Color for an air quality index
pub fn aqi_color(aqi: u8) -> &'static str {
    match aqi {
        1..=5 => AQI_COLORS[usize::from(aqi - 1)],
        _ => AQI_FALLBACK_COLOR,
    }
}

/// Label for an air quality index
pub fn aqi_label(aqi: u8) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Fair",
        3 => "Moderate",
        4 => "Poor",
        5 => "Very Poor",
        _ => "Unknown",
    }
}

fn concentration(value: f64) -> String {
    format!("{} {}", value, CONCENTRATION_UNIT)
}

/// Builds the air-quality panel
pub fn air_quality_view(sample: &AirQualitySample) -> AirQualityView {
    AirQualityView {
        aqi: sample.aqi,
        color: aqi_color(sample.aqi),
        label: aqi_label(sample.aqi),
        pm2_5: concentration(sample.pm2_5),
        pm10: concentration(sample.pm10),
        o3: concentration(sample.o3),
        no2: concentration(sample.no2),
    }
}

/// Tile URL of the temperature overlay centered on `at`
pub fn map_url(at: Coordinates, api_key: &str) -> String {
    format!(
        "{}/{}/{}/{}/{}?appid={}&{}",
        MAP_BASE_URL, MAP_LAYER, MAP_ZOOM, at.latitude, at.longitude, api_key, MAP_STYLE
    )
}

/// Builds the map panel
pub fn map_view(at: Coordinates, api_key: &str) -> MapView {
    MapView {
        coordinates: at,
        zoom: MAP_ZOOM,
        url: map_url(at, api_key),
    }
}
