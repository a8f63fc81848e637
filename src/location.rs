//! Location resolution
//!
//! Coordinates come either from a `Geolocator` (the device's own position) or
//! from geocoding a free-text place name. A terminal has no positioning
//! hardware to ask, so the default geolocator infers the position from the
//! machine's public IP address.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::data::{Coordinates, Place, WeatherApi, WeatherError};

/// Endpoint for IP-based geolocation
const IP_GEOLOCATION_URL: &str = "http://ip-api.com/json";

/// Timeout for the geolocation lookup
const LOCATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Reasons the device position could not be obtained
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    /// Location access was turned off by the user
    #[error("Location access denied")]
    Denied,

    /// No way to determine the position exists on this platform
    #[error("Geolocation is not supported")]
    Unsupported,

    /// The lookup was attempted and failed
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Errors from resolving a place name to a place
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The geocoder returned no match
    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    /// The geocoding request itself failed
    #[error(transparent)]
    Weather(#[from] WeatherError),
}

/// A source of the device's current coordinates
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Geolocator that never grants access
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeolocator;

#[async_trait]
impl Geolocator for DisabledGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Denied)
    }
}

/// Response from ip-api.com
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Geolocator that derives coordinates from the public IP address
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    client: Client,
    url: String,
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IpGeolocator {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(LOCATE_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: IP_GEOLOCATION_URL.to_string(),
        }
    }

    /// Use a different lookup endpoint
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

fn coordinates_from_response(response: IpApiResponse) -> Result<Coordinates, LocationError> {
    if response.status != "success" {
        let reason = response
            .message
            .unwrap_or_else(|| format!("status {}", response.status));
        return Err(LocationError::Unavailable(reason));
    }

    match (response.lat, response.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
        _ => Err(LocationError::Unavailable(
            "response carried no coordinates".to_string(),
        )),
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        debug!(url = %self.url, "looking up position from IP address");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LocationError::Unavailable(format!(
                "status {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let coordinates = coordinates_from_response(body)?;
        info!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "located device"
        );
        Ok(coordinates)
    }
}

/// Resolve a free-text place name to its first geocoding match
pub async fn resolve_place<A>(api: &A, name: &str) -> Result<Place, ResolveError>
where
    A: WeatherApi + ?Sized,
{
    api.geocode(name)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ResolveError::PlaceNotFound(name.to_string()))
}
