use super::http;
use crate::fetch::DataSource;
use async_trait::async_trait;
use propcast_domain::activations::ensure_utc_suffix;
use propcast_domain::{Activation, ActivationKind, DomainError};
use serde_json::Value;
use std::time::Duration;

const SPOTS_URL: &str = "https://api.pota.app/spot/activator";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_ACTIVATIONS: usize = 50;

/// Parks on the Air activator spots.
pub struct PotaSource;

// POTA serializes frequency sometimes as a string, sometimes as a number.
pub(crate) fn field_string(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[async_trait]
impl DataSource<Vec<Activation>> for PotaSource {
    fn name(&self) -> &'static str {
        "POTA"
    }

    async fn fetch(&self) -> Result<Vec<Activation>, DomainError> {
        let items: Vec<Value> = http::get_json(self.name(), SPOTS_URL, HTTP_TIMEOUT).await?;
        Ok(parse_spots(&items))
    }
}

fn parse_spots(items: &[Value]) -> Vec<Activation> {
    items
        .iter()
        .take(MAX_ACTIVATIONS)
        .map(|item| {
            let name = match field_string(item, "name") {
                n if n.is_empty() => field_string(item, "locationDesc"),
                n => n,
            };
            Activation {
                time: ensure_utc_suffix(&field_string(item, "spotTime")),
                callsign: field_string(item, "activator"),
                kind: ActivationKind::Pota,
                reference: field_string(item, "reference"),
                name,
                frequency: field_string(item, "frequency"),
                mode: field_string(item, "mode"),
            }
        })
        .filter(|a| !a.callsign.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_activator_spots() {
        let items: Vec<Value> = serde_json::from_str(
            r#"[
                {"spotTime": "2025-07-01T12:34:56", "activator": "KD8XYZ",
                 "reference": "US-1234", "name": "Some State Park",
                 "frequency": "14285", "mode": "SSB"},
                {"spotTime": "2025-07-01T12:30:00", "activator": "N0CALL",
                 "reference": "US-0001", "locationDesc": "US-MI",
                 "frequency": 7200, "mode": "SSB"},
                {"spotTime": "", "activator": ""}
            ]"#,
        )
        .unwrap();
        let spots = parse_spots(&items);
        assert_eq!(spots.len(), 2);
        assert_eq!(spots[0].time, "2025-07-01T12:34:56Z");
        assert_eq!(spots[0].kind, ActivationKind::Pota);
        assert_eq!(spots[0].reference, "US-1234");
        // locationDesc backfills a missing name; numeric frequency survives.
        assert_eq!(spots[1].name, "US-MI");
        assert_eq!(spots[1].frequency, "7200");
    }
}
