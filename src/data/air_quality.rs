//! Air pollution endpoint
//!
//! Only the first sample of the response (the current hour) is used; later
//! samples are ignored.

use serde::Deserialize;

use super::weather::{coordinate_query, OpenWeatherClient, WeatherError};
use super::{AirQualitySample, Coordinates};

#[derive(Debug, Deserialize)]
struct OwAqiMain {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct OwComponents {
    pm2_5: f64,
    pm10: f64,
    o3: f64,
    no2: f64,
}

#[derive(Debug, Deserialize)]
struct OwAirSample {
    main: OwAqiMain,
    components: OwComponents,
}

/// Response of `/data/2.5/air_pollution`
#[derive(Debug, Deserialize)]
struct OwAirResponse {
    list: Vec<OwAirSample>,
}

fn parse_air_quality(response: OwAirResponse) -> Result<AirQualitySample, WeatherError> {
    let sample = response
        .list
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::MissingField("list".to_string()))?;

    Ok(AirQualitySample {
        aqi: sample.main.aqi,
        pm2_5: sample.components.pm2_5,
        pm10: sample.components.pm10,
        o3: sample.components.o3,
        no2: sample.components.no2,
    })
}

impl OpenWeatherClient {
    /// Fetch the current-hour air quality for the given coordinates
    pub async fn fetch_air_quality(&self, at: Coordinates) -> Result<AirQualitySample, WeatherError> {
        let url = self.data_url("air_pollution");
        let response: OwAirResponse = self.get_json(&url, &coordinate_query(at, false)).await?;
        parse_air_quality(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AIR_RESPONSE: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "list": [
            {
                "main": {"aqi": 2},
                "components": {"co": 201.94, "no": 0.02, "no2": 0.77, "o3": 68.66, "so2": 0.64, "pm2_5": 0.5, "pm10": 0.54, "nh3": 0.12},
                "dt": 1760871600
            },
            {
                "main": {"aqi": 5},
                "components": {"co": 900.0, "no": 5.0, "no2": 80.0, "o3": 200.0, "so2": 9.0, "pm2_5": 90.0, "pm10": 120.0, "nh3": 4.0},
                "dt": 1760875200
            }
        ]
    }"#;

    #[test]
    fn test_parse_air_quality_uses_first_sample() {
        let response: OwAirResponse =
            serde_json::from_str(AIR_RESPONSE).expect("Failed to parse air response");
        let sample = parse_air_quality(response).expect("Failed to build sample");

        assert_eq!(sample.aqi, 2);
        assert!((sample.pm2_5 - 0.5).abs() < 0.001);
        assert!((sample.pm10 - 0.54).abs() < 0.001);
        assert!((sample.o3 - 68.66).abs() < 0.001);
        assert!((sample.no2 - 0.77).abs() < 0.001);
    }

    #[test]
    fn test_parse_air_quality_empty_list_fails() {
        let response: OwAirResponse =
            serde_json::from_str(r#"{"coord": {"lon": 0, "lat": 0}, "list": []}"#)
                .expect("Should parse");
        let result = parse_air_quality(response);
        assert!(matches!(result, Err(WeatherError::MissingField(ref f)) if f == "list"));
    }
}
