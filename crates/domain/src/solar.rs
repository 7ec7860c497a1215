use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw solar indices as published by the HamQSL XML feed.
///
/// Values are kept as the feed's text form (the dashboard renders them
/// verbatim, unit suffixes included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamQslSolar {
    pub solar_flux: String,
    pub a_index: String,
    pub k_index: String,
    pub aurora: String,
    pub sunspots: String,
    pub xray: String,
}

/// Latest planetary K-index sample from the NOAA SWPC feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoaaKIndex {
    pub kp: f64,
    pub time_tag: String,
}

/// One source's contribution to the solar dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SolarObservation {
    HamQsl(HamQslSolar),
    Noaa(NoaaKIndex),
}

/// Merged solar conditions payload served to the dashboard.
///
/// Always fully populated: the merge fills missing fields from the fallback
/// values so consumers never branch on absent data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarConditions {
    pub sfi: String,
    pub a_index: String,
    pub k_index: String,
    pub aurora: String,
    pub sunspots: String,
    pub xray: String,
    pub noaa_kp: Option<f64>,
    pub noaa_timestamp: Option<String>,
    pub storm_activity: String,
    pub storm_probability: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub confidence: f32,
}

impl SolarConditions {
    /// Static payload used when every live source fails.
    pub fn fallback() -> Self {
        Self {
            sfi: "100 SFI".to_string(),
            a_index: "5".to_string(),
            k_index: "2".to_string(),
            aurora: "0".to_string(),
            sunspots: "50".to_string(),
            xray: "B1".to_string(),
            noaa_kp: None,
            noaa_timestamp: None,
            storm_activity: "quiet".to_string(),
            storm_probability: "low".to_string(),
            timestamp: Utc::now(),
            source: "Fallback".to_string(),
            confidence: 0.3,
        }
    }
}

/// Rough storm-activity estimate from a planetary K-index value.
pub fn storm_estimate(kp: Option<f64>) -> (&'static str, &'static str) {
    match kp {
        Some(kp) if kp >= 7.0 => ("severe storm", "high"),
        Some(kp) if kp >= 5.0 => ("storm", "elevated"),
        Some(kp) if kp >= 4.0 => ("unsettled", "moderate"),
        Some(_) => ("quiet", "low"),
        None => ("quiet", "low"),
    }
}
