//! Propcast Domain Layer
pub mod activations;
pub mod config;
pub mod contests;
pub mod errors;
pub mod report;
pub mod solar;
pub mod spots;
pub mod weather;

pub use activations::{Activation, ActivationKind, ActivationsReport};
pub use config::{CliOverrides, Config, ConfigError};
pub use contests::{Contest, ContestCalendar, ContestStatus};
pub use errors::DomainError;
pub use report::PropagationReport;
pub use solar::{NoaaKIndex, SolarConditions};
pub use spots::{BandActivity, Spot, SpotBatch, SpotsReport, SpotsSummary};
pub use weather::WeatherConditions;
