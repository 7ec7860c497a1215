use super::http;
use crate::fetch::DataSource;
use async_trait::async_trait;
use propcast_domain::solar::{HamQslSolar, SolarObservation};
use propcast_domain::DomainError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::time::Duration;

const SOLAR_XML_URL: &str = "https://www.hamqsl.com/solarxml.php";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// HamQSL solar XML feed (N0NBH), the authoritative source for the classic
/// solar indices.
pub struct HamQslSource;

#[async_trait]
impl DataSource<SolarObservation> for HamQslSource {
    fn name(&self) -> &'static str {
        "HamQSL"
    }

    async fn fetch(&self) -> Result<SolarObservation, DomainError> {
        let xml = http::get_text(self.name(), SOLAR_XML_URL, HTTP_TIMEOUT).await?;
        parse_solar_xml(&xml).map(SolarObservation::HamQsl)
    }
}

fn parse_solar_xml(xml: &str) -> Result<HamQslSolar, DomainError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut current: Vec<u8> = Vec::new();
    let mut solar_flux = None;
    let mut a_index = None;
    let mut k_index = None;
    let mut aurora = None;
    let mut sunspots = None;
    let mut xray = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => current = e.name().as_ref().to_vec(),
            Ok(Event::Text(t)) => {
                let text = t
                    .xml_content()
                    .map_err(|e| DomainError::InvalidResponse(format!("HamQSL: {e}")))?
                    .into_owned();
                match current.as_slice() {
                    b"solarflux" => solar_flux = Some(text),
                    b"aindex" => a_index = Some(text),
                    b"kindex" => k_index = Some(text),
                    b"aurora" => aurora = Some(text),
                    b"sunspots" => sunspots = Some(text),
                    b"xray" => xray = Some(text),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => current.clear(),
            Ok(Event::Eof) => break,
            Err(e) => return Err(DomainError::InvalidResponse(format!("HamQSL: {e}"))),
            _ => {}
        }
    }

    // The feed occasionally omits individual indices; "0" matches its own
    // convention for unknown values.
    let or_zero = |v: Option<String>| v.unwrap_or_else(|| "0".to_string());
    if solar_flux.is_none() && k_index.is_none() {
        return Err(DomainError::InvalidResponse(
            "HamQSL: no solar indices in feed".to_string(),
        ));
    }
    Ok(HamQslSolar {
        solar_flux: format!("{} SFI", or_zero(solar_flux)),
        a_index: or_zero(a_index),
        k_index: or_zero(k_index),
        aurora: or_zero(aurora),
        sunspots: or_zero(sunspots),
        xray: or_zero(xray),
    })
}
