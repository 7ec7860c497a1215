use serde::{Deserialize, Serialize};

/// Operator station location. Drives the weather lookup and the spots cache
/// key, so two stations sharing a cache never see each other's weather.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Maidenhead grid square (default: "FN31pr")
    #[serde(default = "default_grid")]
    pub grid: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            grid: default_grid(),
        }
    }
}

fn default_latitude() -> f64 {
    41.7148
}

fn default_longitude() -> f64 {
    -72.7279
}

fn default_grid() -> String {
    "FN31pr".to_string()
}
