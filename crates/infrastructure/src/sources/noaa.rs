use super::http;
use crate::fetch::DataSource;
use async_trait::async_trait;
use propcast_domain::solar::{NoaaKIndex, SolarObservation};
use propcast_domain::DomainError;
use serde::Deserialize;
use std::time::Duration;

const K_INDEX_URL: &str = "https://services.swpc.noaa.gov/json/planetary_k_index_1m.json";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// NOAA Space Weather Prediction Center planetary K-index feed.
pub struct NoaaSwpcSource;

#[derive(Debug, Deserialize)]
struct KIndexSample {
    time_tag: String,
    kp_index: Option<f64>,
    estimated_kp: Option<f64>,
}

#[async_trait]
impl DataSource<SolarObservation> for NoaaSwpcSource {
    fn name(&self) -> &'static str {
        "NOAA"
    }

    async fn fetch(&self) -> Result<SolarObservation, DomainError> {
        let samples: Vec<KIndexSample> =
            http::get_json(self.name(), K_INDEX_URL, HTTP_TIMEOUT).await?;
        latest_kp(samples).map(SolarObservation::Noaa)
    }
}

fn latest_kp(samples: Vec<KIndexSample>) -> Result<NoaaKIndex, DomainError> {
    let latest = samples
        .into_iter()
        .last()
        .ok_or_else(|| DomainError::InvalidResponse("NOAA: empty K-index feed".to_string()))?;
    Ok(NoaaKIndex {
        kp: latest.kp_index.or(latest.estimated_kp).unwrap_or(0.0),
        time_tag: latest.time_tag,
    })
}
