//! OpenWeatherMap API client
//!
//! This module provides the `WeatherApi` seam used by the controller, and the
//! `OpenWeatherClient` implementation that fetches current conditions and the
//! 5-day/3-hour forecast. Geocoding and air pollution live in their own
//! modules as additional `impl OpenWeatherClient` blocks.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::debug;

use super::{
    AirQualitySample, Coordinates, CurrentConditions, Forecast, ForecastEntry, Place,
    WeatherCondition, WeatherReport,
};

/// Base URL for the OpenWeatherMap data API
pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Base URL for the OpenWeatherMap geocoding API
pub const GEOCODING_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// Unit system passed to endpoints that accept one
const UNITS: &str = "metric";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Request failed with status {status}: {body}")]
    BadStatus { status: u16, body: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),
}

/// The weather provider operations the controller depends on
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Resolve a free-text place name to at most one matching place
    async fn geocode(&self, query: &str) -> Result<Vec<Place>, WeatherError>;

    /// Fetch current conditions at the given coordinates
    async fn current(&self, at: Coordinates) -> Result<CurrentConditions, WeatherError>;

    /// Fetch the 3-hourly forecast at the given coordinates
    async fn forecast(&self, at: Coordinates) -> Result<Forecast, WeatherError>;

    /// Fetch the current-hour air quality at the given coordinates
    async fn air_quality(&self, at: Coordinates) -> Result<AirQualitySample, WeatherError>;
}

/// Fetch current conditions, forecast, and air quality concurrently
///
/// The first failure aborts the whole report, so callers never see a partial
/// result.
pub async fn fetch_report<A>(api: &A, at: Coordinates) -> Result<WeatherReport, WeatherError>
where
    A: WeatherApi + ?Sized,
{
    let (current, forecast, air_quality) =
        futures::try_join!(api.current(at), api.forecast(at), api.air_quality(at))?;

    Ok(WeatherReport {
        current,
        forecast,
        air_quality,
    })
}

/// Client for the OpenWeatherMap REST API
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    geo_base_url: String,
}

impl OpenWeatherClient {
    /// Create a new client for the public OpenWeatherMap endpoints
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, api_key))
    }

    /// Create a new client with a custom HTTP client
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: OPENWEATHER_BASE_URL.to_string(),
            geo_base_url: GEOCODING_BASE_URL.to_string(),
        }
    }

    /// Point the client at different data and geocoding roots
    pub fn with_base_urls(
        mut self,
        base_url: impl Into<String>,
        geo_base_url: impl Into<String>,
    ) -> Self {
        self.base_url = base_url.into();
        self.geo_base_url = geo_base_url.into();
        self
    }

    pub(crate) fn data_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    pub(crate) fn geo_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.geo_base_url.trim_end_matches('/'), endpoint)
    }

    /// Issue a GET and decode the JSON body
    ///
    /// The credential is appended to `query`; non-success statuses are
    /// reported with a truncated body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        debug!(%url, "requesting");

        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(WeatherError::BadStatus {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch current conditions for the given coordinates
    pub async fn fetch_current(&self, at: Coordinates) -> Result<CurrentConditions, WeatherError> {
        let url = self.data_url("weather");
        let response: OwCurrentResponse = self.get_json(&url, &coordinate_query(at, true)).await?;
        parse_current(response)
    }

    /// Fetch the 5-day/3-hour forecast for the given coordinates
    pub async fn fetch_forecast(&self, at: Coordinates) -> Result<Forecast, WeatherError> {
        let url = self.data_url("forecast");
        let response: OwForecastResponse =
            self.get_json(&url, &coordinate_query(at, true)).await?;
        parse_forecast(response)
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn geocode(&self, query: &str) -> Result<Vec<Place>, WeatherError> {
        self.fetch_places(query).await
    }

    async fn current(&self, at: Coordinates) -> Result<CurrentConditions, WeatherError> {
        self.fetch_current(at).await
    }

    async fn forecast(&self, at: Coordinates) -> Result<Forecast, WeatherError> {
        self.fetch_forecast(at).await
    }

    async fn air_quality(&self, at: Coordinates) -> Result<AirQualitySample, WeatherError> {
        self.fetch_air_quality(at).await
    }
}

/// Build the `lat`/`lon` (and optionally `units`) query pairs
pub(crate) fn coordinate_query(at: Coordinates, with_units: bool) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("lat", at.latitude.to_string()),
        ("lon", at.longitude.to_string()),
    ];
    if with_units {
        query.push(("units", UNITS.to_string()));
    }
    query
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Take the first weather category of a response
fn first_condition(weather: Vec<OwWeather>) -> Result<WeatherCondition, WeatherError> {
    weather
        .into_iter()
        .next()
        .map(|w| WeatherCondition::new(w.icon, w.description))
        .ok_or_else(|| WeatherError::MissingField("weather".to_string()))
}

fn parse_current(response: OwCurrentResponse) -> Result<CurrentConditions, WeatherError> {
    let condition = first_condition(response.weather)?;

    Ok(CurrentConditions {
        name: response.name,
        country: response.sys.country.unwrap_or_default(),
        temperature: response.main.temp,
        feels_like: response.main.feels_like,
        humidity: response.main.humidity.round() as u8,
        wind_speed: response.wind.speed,
        pressure: response.main.pressure,
        sunrise: response.sys.sunrise,
        sunset: response.sys.sunset,
        timezone_offset: response.timezone,
        condition,
    })
}

fn parse_forecast(response: OwForecastResponse) -> Result<Forecast, WeatherError> {
    let entries = response
        .list
        .into_iter()
        .map(|item| {
            Ok(ForecastEntry {
                timestamp: item.dt,
                temperature: item.main.temp,
                temp_min: item.main.temp_min,
                temp_max: item.main.temp_max,
                condition: first_condition(item.weather)?,
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    Ok(Forecast {
        entries,
        timezone_offset: response.city.timezone,
    })
}

/// Weather category entry shared by current and forecast responses
#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentMain {
    temp: f64,
    feels_like: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

/// Response of `/data/2.5/weather`
#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    weather: Vec<OwWeather>,
    main: OwCurrentMain,
    wind: OwWind,
    sys: OwSys,
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    #[serde(default)]
    timezone: i32,
}

/// Response of `/data/2.5/forecast`
#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastItem>,
    city: OwCity,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample `/weather` response for London
    const CURRENT_RESPONSE: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "base": "stations",
        "main": {
            "temp": 14.6,
            "feels_like": 14.1,
            "temp_min": 13.2,
            "temp_max": 15.8,
            "pressure": 1012,
            "humidity": 81
        },
        "visibility": 10000,
        "wind": {"speed": 4.12, "deg": 250},
        "clouds": {"all": 75},
        "dt": 1760871600,
        "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1760855280, "sunset": 1760892900},
        "timezone": 3600,
        "id": 2643743,
        "name": "London",
        "cod": 200
    }"#;

    /// Sample `/forecast` response trimmed to three entries
    const FORECAST_RESPONSE: &str = r#"{
        "cod": "200",
        "message": 0,
        "cnt": 3,
        "list": [
            {"dt": 1760875200, "main": {"temp": 14.0, "feels_like": 13.5, "temp_min": 13.1, "temp_max": 14.9, "pressure": 1012, "humidity": 80},
             "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}], "dt_txt": "2025-10-19 12:00:00"},
            {"dt": 1760886000, "main": {"temp": 12.0, "feels_like": 11.2, "temp_min": 11.5, "temp_max": 12.3, "pressure": 1013, "humidity": 85},
             "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}], "dt_txt": "2025-10-19 15:00:00"},
            {"dt": 1760896800, "main": {"temp": 10.0, "feels_like": 9.1, "temp_min": 9.8, "temp_max": 10.4, "pressure": 1014, "humidity": 88},
             "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}], "dt_txt": "2025-10-19 18:00:00"}
        ],
        "city": {"id": 2643743, "name": "London", "country": "GB", "timezone": 3600, "sunrise": 1760855280, "sunset": 1760892900}
    }"#;

    #[test]
    fn test_parse_current_response() {
        let response: OwCurrentResponse =
            serde_json::from_str(CURRENT_RESPONSE).expect("Failed to parse current response");
        let current = parse_current(response).expect("Failed to build conditions");

        assert_eq!(current.name, "London");
        assert_eq!(current.country, "GB");
        assert!((current.temperature - 14.6).abs() < 0.01);
        assert!((current.feels_like - 14.1).abs() < 0.01);
        assert_eq!(current.humidity, 81);
        assert!((current.wind_speed - 4.12).abs() < 0.01);
        assert!((current.pressure - 1012.0).abs() < 0.01);
        assert_eq!(current.sunrise, 1760855280);
        assert_eq!(current.sunset, 1760892900);
        assert_eq!(current.timezone_offset, 3600);
        assert_eq!(current.condition, WeatherCondition::new("10d", "light rain"));
    }

    #[test]
    fn test_parse_current_without_country() {
        let json = CURRENT_RESPONSE.replace(r#""country": "GB", "#, "");
        let response: OwCurrentResponse = serde_json::from_str(&json).expect("Should parse");
        let current = parse_current(response).expect("Should build conditions");
        assert_eq!(current.country, "");
    }

    #[test]
    fn test_parse_current_with_empty_weather_fails() {
        let json = CURRENT_RESPONSE.replace(
            r#"[{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]"#,
            "[]",
        );
        let response: OwCurrentResponse = serde_json::from_str(&json).expect("Should parse");
        let result = parse_current(response);
        assert!(matches!(result, Err(WeatherError::MissingField(ref f)) if f == "weather"));
    }

    #[test]
    fn test_parse_forecast_response() {
        let response: OwForecastResponse =
            serde_json::from_str(FORECAST_RESPONSE).expect("Failed to parse forecast response");
        let forecast = parse_forecast(response).expect("Failed to build forecast");

        assert_eq!(forecast.timezone_offset, 3600);
        assert_eq!(forecast.entries.len(), 3);
        assert_eq!(forecast.entries[0].timestamp, 1760875200);
        assert!((forecast.entries[1].temp_min - 11.5).abs() < 0.01);
        assert!((forecast.entries[1].temp_max - 12.3).abs() < 0.01);
        assert_eq!(forecast.entries[2].condition.icon, "01n");
    }

    #[test]
    fn test_parse_malformed_response_fails() {
        let result: Result<OwCurrentResponse, _> = serde_json::from_str(r#"{"cod": 401}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_coordinate_query_with_units() {
        let query = coordinate_query(Coordinates::new(51.5, -0.12), true);
        assert_eq!(
            query,
            vec![
                ("lat", "51.5".to_string()),
                ("lon", "-0.12".to_string()),
                ("units", "metric".to_string()),
            ]
        );
    }

    #[test]
    fn test_coordinate_query_without_units() {
        let query = coordinate_query(Coordinates::new(1.0, 2.0), false);
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(250);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_urls_respect_custom_base() {
        let client = OpenWeatherClient::with_client(Client::new(), "key")
            .with_base_urls("http://localhost:9000/data/", "http://localhost:9000/geo");
        assert_eq!(client.data_url("weather"), "http://localhost:9000/data/weather");
        assert_eq!(client.geo_url("direct"), "http://localhost:9000/geo/direct");
        assert_eq!(client.api_key, "key");
    }
}
