//! Configuration structures, organized by section:
//! - `root`: top-level config, file loading, CLI overrides
//! - `server`: web server binding
//! - `station`: operator location
//! - `weather`: weather source credentials and units
//! - `jobs`: background job intervals
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod errors;
pub mod jobs;
pub mod logging;
pub mod root;
pub mod server;
pub mod station;
pub mod weather;

pub use errors::ConfigError;
pub use jobs::JobsConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use station::StationConfig;
pub use weather::WeatherSourceConfig;
