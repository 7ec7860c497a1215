use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Program a portable activation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationKind {
    Pota,
    Sota,
}

impl ActivationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pota => "POTA",
            Self::Sota => "SOTA",
        }
    }
}

/// One active portable station (park or summit activator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    /// Spot time as reported upstream, normalized to a UTC suffix.
    pub time: String,
    pub callsign: String,
    pub kind: ActivationKind,
    pub reference: String,
    pub name: String,
    pub frequency: String,
    pub mode: String,
}

/// Merged POTA + SOTA activations payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationsReport {
    pub timestamp: DateTime<Utc>,
    pub pota_count: usize,
    pub sota_count: usize,
    pub total_count: usize,
    pub activations: Vec<Activation>,
    pub source: String,
    pub confidence: f32,
}

impl ActivationsReport {
    /// Static payload used when both activation sources fail.
    pub fn fallback() -> Self {
        Self {
            timestamp: Utc::now(),
            pota_count: 0,
            sota_count: 0,
            total_count: 0,
            activations: Vec::new(),
            source: "Fallback".to_string(),
            confidence: 0.3,
        }
    }
}

/// Normalize an upstream timestamp to carry an explicit UTC marker.
///
/// Both POTA and SOTA emit naive ISO timestamps that are in fact UTC; the
/// frontend needs the `Z` suffix to convert to local time.
pub fn ensure_utc_suffix(time: &str) -> String {
    if time.is_empty() || time.ends_with('Z') || time.contains('+') {
        time.to_string()
    } else {
        format!("{time}Z")
    }
}
