use super::http;
use crate::fetch::DataSource;
use async_trait::async_trait;
use propcast_domain::{DomainError, Spot, SpotBatch};
use serde::Deserialize;
use std::time::Duration;

// WSPRNet's own site only exposes spots as HTML; wspr.live mirrors the same
// database with a JSON interface.
const QUERY_URL: &str = "https://db1.wspr.live/?query=SELECT%20time,%20tx_sign,%20tx_loc,%20rx_sign,%20rx_loc,%20frequency,%20snr%20FROM%20wspr.rx%20ORDER%20BY%20time%20DESC%20LIMIT%20100%20FORMAT%20JSON";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Recent WSPR spots via the wspr.live mirror of the WSPRNet database.
pub struct WsprNetSource;

#[derive(Debug, Deserialize)]
struct WsprResponse {
    #[serde(default)]
    data: Vec<WsprRow>,
}

#[derive(Debug, Deserialize)]
struct WsprRow {
    time: String,
    tx_sign: String,
    tx_loc: String,
    rx_sign: String,
    rx_loc: String,
    /// Hz
    frequency: f64,
    snr: i32,
}

#[async_trait]
impl DataSource<SpotBatch> for WsprNetSource {
    fn name(&self) -> &'static str {
        "WSPRNet"
    }

    async fn fetch(&self) -> Result<SpotBatch, DomainError> {
        let response: WsprResponse = http::get_json(self.name(), QUERY_URL, HTTP_TIMEOUT).await?;
        Ok(SpotBatch::new(self.name(), to_spots(response)))
    }
}

fn to_spots(response: WsprResponse) -> Vec<Spot> {
    response
        .data
        .into_iter()
        .filter(|row| !row.tx_sign.is_empty() && row.frequency > 0.0)
        .map(|row| Spot {
            callsign: row.tx_sign,
            frequency: (row.frequency / 1_000_000.0 * 1e6).round() / 1e6,
            mode: "WSPR".to_string(),
            snr: row.snr,
            spotter: row.rx_sign,
            spotter_grid: row.rx_loc,
            sender_grid: row.tx_loc,
            dxcc: String::new(),
            timestamp: row.time,
            source: "WSPRNet".to_string(),
        })
        .collect()
}
