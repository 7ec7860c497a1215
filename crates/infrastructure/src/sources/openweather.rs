use super::http;
use crate::fetch::DataSource;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use propcast_domain::{DomainError, WeatherConditions};
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// OpenWeatherMap current-conditions API for the station location.
pub struct OpenWeatherSource {
    latitude: f64,
    longitude: f64,
    api_key: Option<String>,
    temp_unit: String,
}

impl OpenWeatherSource {
    pub fn new(latitude: f64, longitude: f64, api_key: Option<String>, temp_unit: &str) -> Self {
        Self {
            latitude,
            longitude,
            api_key,
            temp_unit: temp_unit.to_ascii_uppercase(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    #[serde(default)]
    wind: OwmWind,
    #[serde(default)]
    clouds: OwmClouds,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    visibility: Option<f64>,
    name: Option<String>,
    #[serde(default)]
    sys: OwmSys,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: Option<u32>,
    pressure: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
    deg: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmClouds {
    all: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[async_trait]
impl DataSource<WeatherConditions> for OpenWeatherSource {
    fn name(&self) -> &'static str {
        "OpenWeatherMap"
    }

    async fn fetch(&self) -> Result<WeatherConditions, DomainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::MissingCredential("OPENWEATHER_API_KEY".to_string()))?;

        // Always request metric and convert locally.
        let url = format!(
            "{BASE_URL}?lat={}&lon={}&appid={api_key}&units=metric",
            self.latitude, self.longitude
        );
        let response: OwmResponse = http::get_json(self.name(), &url, HTTP_TIMEOUT).await?;
        Ok(to_conditions(response, &self.temp_unit))
    }
}

fn to_conditions(response: OwmResponse, temp_unit: &str) -> WeatherConditions {
    let temp_celsius = response.main.temp;
    let temperature = if temp_unit == "F" {
        temp_celsius * 9.0 / 5.0 + 32.0
    } else {
        temp_celsius
    };

    let weather = response.weather.first();
    let epoch_to_utc = |secs: i64| DateTime::<Utc>::from_timestamp(secs, 0);

    WeatherConditions {
        temperature: (temperature * 10.0).round() / 10.0,
        temp_unit: temp_unit.to_string(),
        humidity: response.main.humidity.unwrap_or(50),
        pressure: response.main.pressure.unwrap_or(1013.25),
        // m/s to mph
        wind_speed: ((response.wind.speed.unwrap_or(0.0) * 2.237) * 10.0).round() / 10.0,
        wind_direction: response.wind.deg.unwrap_or(0),
        visibility_km: (response.visibility.unwrap_or(10_000.0) / 1000.0 * 10.0).round() / 10.0,
        cloud_cover: response.clouds.all.unwrap_or(0),
        condition: weather
            .and_then(|w| w.main.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        description: weather
            .and_then(|w| w.description.clone())
            .unwrap_or_default(),
        city: response.name.unwrap_or_else(|| "Unknown".to_string()),
        country: response.sys.country.unwrap_or_default(),
        sunrise: response.sys.sunrise.and_then(epoch_to_utc),
        sunset: response.sys.sunset.and_then(epoch_to_utc),
        timestamp: Utc::now(),
        source: "OpenWeatherMap".to_string(),
        confidence: 0.9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "main": {"temp": 20.0, "humidity": 61, "pressure": 1018.0},
        "wind": {"speed": 4.0, "deg": 270},
        "clouds": {"all": 40},
        "weather": [{"main": "Clouds", "description": "scattered clouds"}],
        "visibility": 10000,
        "name": "Hartford",
        "sys": {"country": "US", "sunrise": 1751360400, "sunset": 1751414400}
    }"#;

    #[test]
    fn converts_units_to_fahrenheit() {
        let response: OwmResponse = serde_json::from_str(SAMPLE).unwrap();
        let conditions = to_conditions(response, "F");
        assert_eq!(conditions.temperature, 68.0);
        assert_eq!(conditions.temp_unit, "F");
        assert_eq!(conditions.wind_speed, 8.9);
        assert_eq!(conditions.visibility_km, 10.0);
        assert_eq!(conditions.city, "Hartford");
        assert_eq!(conditions.country, "US");
        assert!(conditions.sunrise.is_some());
    }

    #[test]
    fn keeps_celsius_when_configured() {
        let response: OwmResponse = serde_json::from_str(SAMPLE).unwrap();
        let conditions = to_conditions(response, "C");
        assert_eq!(conditions.temperature, 20.0);
    }

    #[test]
    fn tolerates_sparse_response() {
        let response: OwmResponse = serde_json::from_str(r#"{"main": {"temp": 10.0}}"#).unwrap();
        let conditions = to_conditions(response, "C");
        assert_eq!(conditions.humidity, 50);
        assert_eq!(conditions.condition, "Unknown");
        assert_eq!(conditions.city, "Unknown");
        assert!(conditions.sunrise.is_none());
    }
}
