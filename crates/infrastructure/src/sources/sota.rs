use super::http;
use super::pota::field_string;
use crate::fetch::DataSource;
use async_trait::async_trait;
use propcast_domain::activations::ensure_utc_suffix;
use propcast_domain::{Activation, ActivationKind, DomainError};
use serde_json::Value;
use std::time::Duration;

const SPOTS_URL: &str = "https://api2.sota.org.uk/api/spots/-1/all?limit=50";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_ACTIVATIONS: usize = 50;

/// Summits on the Air activator spots.
pub struct SotaSource;

#[async_trait]
impl DataSource<Vec<Activation>> for SotaSource {
    fn name(&self) -> &'static str {
        "SOTA"
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
            let association = field_string(item, "associationCode");
            let summit = field_string(item, "summitCode");
            let reference = match (association.is_empty(), summit.is_empty()) {
                (false, false) => format!("{association}/{summit}"),
                (false, true) => association,
                _ => summit,
            };
            let name = match field_string(item, "summitDetails") {
                n if n.is_empty() => field_string(item, "comments"),
                n => n,
            };
            Activation {
                time: ensure_utc_suffix(&field_string(item, "timeStamp")),
                callsign: field_string(item, "activatorCallsign"),
                kind: ActivationKind::Sota,
                reference,
                name,
                frequency: field_string(item, "frequency"),
                mode: field_string(item, "mode"),
            }
        })
        .filter(|a| !a.callsign.is_empty())
        .collect()
}
