use super::{
    ConfigError, JobsConfig, LoggingConfig, ServerConfig, StationConfig, WeatherSourceConfig,
};
use serde::{Deserialize, Serialize};

/// Top-level application configuration, loaded from TOML with defaults for
/// every field.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub station: StationConfig,

    #[serde(default)]
    pub weather: WeatherSourceConfig,

    #[serde(default)]
    pub jobs: JobsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// CLI flags that take precedence over file values.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    /// Load configuration from an optional TOML file, apply CLI overrides and
    /// the `OPENWEATHER_API_KEY` environment variable, then validate.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_string(),
                    source,
                })?;
                toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                    path: path.to_string(),
                    source,
                })?
            }
            None => Self::default(),
        };

        if let Some(bind) = overrides.bind_address {
            config.server.bind_address = bind;
        }
        if let Some(port) = overrides.port {
            config.server.port = port;
        }
        if config.weather.api_key.is_none() {
            config.weather.api_key = std::env::var("OPENWEATHER_API_KEY").ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-90.0..=90.0).contains(&self.station.latitude) {
            return Err(ConfigError::Invalid(format!(
                "latitude {} out of range",
                self.station.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.station.longitude) {
            return Err(ConfigError::Invalid(format!(
                "longitude {} out of range",
                self.station.longitude
            )));
        }
        let unit = self.weather.temp_unit.to_ascii_uppercase();
        if unit != "F" && unit != "C" {
            return Err(ConfigError::Invalid(format!(
                "temp_unit must be F or C, got {}",
                self.weather.temp_unit
            )));
        }
        if self.jobs.refresh_interval_secs == 0 || self.jobs.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "job intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8087);
        assert_eq!(config.weather.temp_unit, "F");
        assert_eq!(config.jobs.sweep_interval_secs, 300);
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [station]
            latitude = 51.5
            longitude = -0.1
            grid = "IO91wm"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.station.grid, "IO91wm");
        // Sections absent from the file still get usable defaults.
        assert_eq!(config.weather.temp_unit, "F");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn logging_section_accepts_filter_directives() {
        let config: Config = toml::from_str(
            r#"
            [logging]
            level = "info,propcast_infrastructure=debug"
            ansi = false
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "info,propcast_infrastructure=debug");
        assert!(!config.logging.ansi);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_latitude() {
        let mut config = Config::default();
        config.station.latitude = 120.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_temp_unit() {
        let mut config = Config::default();
        config.weather.temp_unit = "K".to_string();
        assert!(config.validate().is_err());
    }
}
