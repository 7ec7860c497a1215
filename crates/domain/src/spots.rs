use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One reception report ("spot") from any spotting network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub callsign: String,
    /// Frequency in MHz.
    pub frequency: f64,
    pub mode: String,
    pub snr: i32,
    pub spotter: String,
    pub spotter_grid: String,
    pub sender_grid: String,
    pub dxcc: String,
    pub timestamp: String,
    pub source: String,
}

/// Everything one spotting source contributed to a single fan-out call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotBatch {
    pub spots: Vec<Spot>,
    pub count: usize,
    pub source: String,
}

impl SpotBatch {
    pub fn new(source: &str, spots: Vec<Spot>) -> Self {
        Self {
            count: spots.len(),
            spots,
            source: source.to_string(),
        }
    }
}

/// Per-band activity derived from the merged spot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandActivity {
    pub count: usize,
    pub avg_snr: f64,
    pub modes: Vec<String>,
}

/// Headline numbers rendered at the top of the activity panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotsSummary {
    pub total_spots: usize,
    pub active_bands: usize,
    pub active_modes: usize,
    pub active_dxcc: usize,
}

/// Merged live-activity payload served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotsReport {
    pub timestamp: DateTime<Utc>,
    pub sources: Vec<String>,
    pub source_counts: BTreeMap<String, usize>,
    pub total_spots: usize,
    pub summary: SpotsSummary,
    pub spots: Vec<Spot>,
    pub band_activity: BTreeMap<String, BandActivity>,
    pub mode_breakdown: BTreeMap<String, usize>,
    pub confidence: f32,
}

impl SpotsReport {
    /// Static payload used when every spotting source fails.
    pub fn fallback() -> Self {
        Self {
            timestamp: Utc::now(),
            sources: vec!["Fallback".to_string()],
            source_counts: BTreeMap::new(),
            total_spots: 0,
            summary: SpotsSummary {
                total_spots: 0,
                active_bands: 0,
                active_modes: 0,
                active_dxcc: 0,
            },
            spots: Vec::new(),
            band_activity: BTreeMap::new(),
            mode_breakdown: BTreeMap::new(),
            confidence: 0.3,
        }
    }
}

/// Amateur band edges in MHz, 160 m through 6 m.
pub const BANDS: [(&str, f64, f64); 11] = [
    ("160m", 1.8, 2.0),
    ("80m", 3.5, 4.0),
    ("60m", 5.3, 5.4),
    ("40m", 7.0, 7.3),
    ("30m", 10.1, 10.15),
    ("20m", 14.0, 14.35),
    ("17m", 18.068, 18.168),
    ("15m", 21.0, 21.45),
    ("12m", 24.89, 24.99),
    ("10m", 28.0, 29.7),
    ("6m", 50.0, 54.0),
];

/// Band name for a frequency in MHz, if it falls inside an amateur band.
pub fn band_for_frequency(mhz: f64) -> Option<&'static str> {
    BANDS
        .iter()
        .find(|(_, low, high)| mhz >= *low && mhz <= *high)
        .map(|(name, _, _)| *name)
}

/// Group spots into per-band counts, average SNR, and mode sets.
///
/// Bands with no activity are included with zeroed stats so the UI renders a
/// stable band list.
pub fn analyze_band_activity(spots: &[Spot]) -> BTreeMap<String, BandActivity> {
    let mut activity: BTreeMap<String, BandActivity> = BANDS
        .iter()
        .map(|(name, _, _)| {
            (
                name.to_string(),
                BandActivity {
                    count: 0,
                    avg_snr: 0.0,
                    modes: Vec::new(),
                },
            )
        })
        .collect();

    let mut snr_totals: BTreeMap<&'static str, i64> = BTreeMap::new();
    let mut mode_sets: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();

    for spot in spots {
        let Some(band) = band_for_frequency(spot.frequency) else {
            continue;
        };
        if let Some(entry) = activity.get_mut(band) {
            entry.count += 1;
        }
        *snr_totals.entry(band).or_default() += i64::from(spot.snr);
        mode_sets.entry(band).or_default().insert(spot.mode.clone());
    }

    for (band, total_snr) in snr_totals {
        if let Some(entry) = activity.get_mut(band) {
            entry.avg_snr = (total_snr as f64 / entry.count as f64 * 10.0).round() / 10.0;
        }
    }
    for (band, modes) in mode_sets {
        if let Some(entry) = activity.get_mut(band) {
            entry.modes = modes.into_iter().collect();
        }
    }

    activity
}
