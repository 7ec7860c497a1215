use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Active,
    Upcoming,
    Finished,
    Unknown,
}

/// One contest from the WA7BNM calendar feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub name: String,
    pub link: String,
    pub description: String,
    pub mode: String,
    pub status: ContestStatus,
    pub time_info: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Contest calendar payload served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestCalendar {
    pub timestamp: DateTime<Utc>,
    pub contests: Vec<Contest>,
    pub active_count: usize,
    pub upcoming_count: usize,
    pub source: String,
    pub confidence: f32,
}

impl ContestCalendar {
    /// Static payload used when the calendar feed fails.
    pub fn fallback() -> Self {
        Self {
            timestamp: Utc::now(),
            contests: Vec::new(),
            active_count: 0,
            upcoming_count: 0,
            source: "Fallback".to_string(),
            confidence: 0.3,
        }
    }
}

/// Classify a contest relative to `now` and produce the short label shown in
/// the calendar panel.
pub fn classify(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (ContestStatus, String) {
    match (start, end) {
        (Some(start), Some(end)) if start <= now && now <= end => {
            let remaining = end - now;
            (
                ContestStatus::Active,
                format!("ends in {}h", remaining.num_hours().max(0)),
            )
        }
        (Some(start), _) if start > now => {
            let until = start - now;
            let label = if until.num_hours() < 48 {
                format!("starts in {}h", until.num_hours())
            } else {
                format!("starts in {}d", until.num_days())
            };
            (ContestStatus::Upcoming, label)
        }
        (Some(_), Some(end)) if end < now => (ContestStatus::Finished, "finished".to_string()),
        _ => (ContestStatus::Unknown, String::new()),
    }
}

/// Guess the operating mode from a contest title.
pub fn detect_mode(title: &str) -> String {
    let lower = title.to_ascii_lowercase();
    if lower.contains("cw") {
        "CW"
    } else if lower.contains("rtty") {
        "RTTY"
    } else if lower.contains("ft8") || lower.contains("ft4") || lower.contains("digi") {
        "Digital"
    } else if lower.contains("ssb") || lower.contains("phone") {
        "SSB"
    } else {
        "Mixed"
    }
    .to_string()
}

/// Order contests active-first, then by start time.
pub fn sort_contests(contests: &mut [Contest]) {
    contests.sort_by(|a, b| {
        let rank = |c: &Contest| u8::from(c.status != ContestStatus::Active);
        rank(a)
            .cmp(&rank(b))
            .then_with(|| a.start.cmp(&b.start))
    });
}
