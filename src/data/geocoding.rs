//! Direct geocoding: resolve a place name to coordinates

use serde::Deserialize;

use super::weather::{OpenWeatherClient, WeatherError};
use super::{Coordinates, Place};

/// Maximum number of matches requested from the geocoder
const GEOCODE_LIMIT: u8 = 1;

/// One match from `/geo/1.0/direct`
#[derive(Debug, Deserialize)]
struct OwGeocodeMatch {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
}

impl From<OwGeocodeMatch> for Place {
    fn from(m: OwGeocodeMatch) -> Self {
        Place {
            name: m.name,
            country: m.country,
            coordinates: Coordinates::new(m.lat, m.lon),
        }
    }
}

impl OpenWeatherClient {
    /// Look up places matching `query`
    ///
    /// Returns an empty list when nothing matches.
    pub async fn fetch_places(&self, query: &str) -> Result<Vec<Place>, WeatherError> {
        let url = self.geo_url("direct");
        let matches: Vec<OwGeocodeMatch> = self
            .get_json(
                &url,
                &[("q", query.to_string()), ("limit", GEOCODE_LIMIT.to_string())],
            )
            .await?;

        Ok(matches.into_iter().map(Place::from).collect())
    }
}
