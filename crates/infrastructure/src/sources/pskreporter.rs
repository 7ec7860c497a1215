use super::http;
use crate::fetch::DataSource;
use async_trait::async_trait;
use propcast_domain::{DomainError, Spot, SpotBatch};
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::time::Duration;

const QUERY_URL: &str = "https://retrieve.pskreporter.info/query?flowStartSeconds=900";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_SPOTS: usize = 100;

/// PSKReporter reception reports from the last 15 minutes.
pub struct PskReporterSource;

#[async_trait]
impl DataSource<SpotBatch> for PskReporterSource {
    fn name(&self) -> &'static str {
        "PSKReporter"
    }

    async fn fetch(&self) -> Result<SpotBatch, DomainError> {
        let xml = http::get_text(self.name(), QUERY_URL, HTTP_TIMEOUT).await?;
        let spots = parse_reception_reports(&xml)?;
        Ok(SpotBatch::new(self.name(), spots))
    }
}

fn attr(element: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

fn parse_report(element: &BytesStart<'_>) -> Option<Spot> {
    let callsign = attr(element, b"senderCallsign").unwrap_or_default();
    let freq_hz: f64 = attr(element, b"frequency")?.parse().ok()?;
    let frequency = (freq_hz / 1_000_000.0 * 1e6).round() / 1e6;
    if callsign.is_empty() || frequency <= 0.0 {
        return None;
    }
    Some(Spot {
        callsign,
        frequency,
        mode: attr(element, b"mode").unwrap_or_else(|| "Unknown".to_string()),
        snr: attr(element, b"sNR").and_then(|s| s.parse().ok()).unwrap_or(0),
        spotter: attr(element, b"receiverCallsign").unwrap_or_default(),
        spotter_grid: attr(element, b"receiverLocator").unwrap_or_default(),
        sender_grid: attr(element, b"senderLocator").unwrap_or_default(),
        dxcc: attr(element, b"senderDXCC").unwrap_or_default(),
        timestamp: attr(element, b"flowStartSeconds").unwrap_or_default(),
        source: "PSKReporter".to_string(),
    })
}

fn parse_reception_reports(xml: &str) -> Result<Vec<Spot>, DomainError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut spots = Vec::new();
    loop {
        let event = reader
            .read_event()
            .map_err(|e| DomainError::InvalidResponse(format!("PSKReporter: {e}")))?;
        match event {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"receptionReport" => {
                if let Some(spot) = parse_report(&e) {
                    spots.push(spot);
                    if spots.len() >= MAX_SPOTS {
                        break;
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(spots)
}
