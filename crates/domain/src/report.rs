use crate::{ActivationsReport, ContestCalendar, SolarConditions, SpotsReport, WeatherConditions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full dashboard report: every dataset the UI renders, assembled from the
/// individual providers. Each section already degrades to its own fallback,
/// so the report as a whole is always complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropagationReport {
    pub timestamp: DateTime<Utc>,
    pub station_grid: String,
    pub solar: SolarConditions,
    pub weather: WeatherConditions,
    pub spots: SpotsReport,
    pub activations: ActivationsReport,
    pub contests: ContestCalendar,
}
