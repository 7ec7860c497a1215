use serde::{Deserialize, Serialize};

/// Weather source settings. The API key may also arrive via the
/// `OPENWEATHER_API_KEY` environment variable (checked at load time).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherSourceConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    /// Display unit, "F" or "C" (default: "F")
    #[serde(default = "default_temp_unit")]
    pub temp_unit: String,
}

impl Default for WeatherSourceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            temp_unit: default_temp_unit(),
        }
    }
}

fn default_temp_unit() -> String {
    "F".to_string()
}
