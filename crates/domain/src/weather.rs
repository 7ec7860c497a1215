use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surface weather at the station location, used for tropospheric analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub temperature: f64,
    pub temp_unit: String,
    pub humidity: u32,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: u32,
    pub visibility_km: f64,
    pub cloud_cover: u32,
    pub condition: String,
    pub description: String,
    pub city: String,
    pub country: String,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub confidence: f32,
}

impl WeatherConditions {
    /// Static payload used when the weather source fails.
    ///
    /// `temp_unit` follows station configuration so the rendered value stays
    /// plausible either way.
    pub fn fallback(temp_unit: &str) -> Self {
        let fahrenheit = temp_unit.eq_ignore_ascii_case("F");
        Self {
            temperature: if fahrenheit { 72.0 } else { 22.0 },
            temp_unit: temp_unit.to_ascii_uppercase(),
            humidity: 50,
            pressure: 1013.25,
            wind_speed: 5.0,
            wind_direction: 0,
            visibility_km: 10.0,
            cloud_cover: 0,
            condition: "Unknown".to_string(),
            description: "Weather data unavailable".to_string(),
            city: "Unknown".to_string(),
            country: String::new(),
            sunrise: None,
            sunset: None,
            timestamp: Utc::now(),
            source: "Fallback".to_string(),
            confidence: 0.3,
        }
    }
}
