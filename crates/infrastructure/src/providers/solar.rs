use crate::cache::CacheStore;
use crate::fetch::{DataSource, FanoutFetcher, FetchResults};
use crate::sources::{HamQslSource, NoaaSwpcSource};
use chrono::Utc;
use propcast_domain::solar::{storm_estimate, SolarObservation};
use propcast_domain::SolarConditions;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const NAMESPACE: &str = "solar";
const KEY: &str = "conditions";
const TTL: Duration = Duration::from_secs(300);
const PER_SOURCE_DEADLINE: Duration = Duration::from_secs(5);
const OVERALL_DEADLINE: Duration = Duration::from_secs(10);

/// Solar conditions from HamQSL (authoritative) enhanced with NOAA SWPC
/// K-index data.
pub struct SolarProvider {
    cache: Arc<CacheStore>,
    fetcher: FanoutFetcher,
    sources: Vec<Arc<dyn DataSource<SolarObservation>>>,
}

impl SolarProvider {
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self::with_sources(cache, vec![Arc::new(HamQslSource), Arc::new(NoaaSwpcSource)])
    }

    pub fn with_sources(
        cache: Arc<CacheStore>,
        sources: Vec<Arc<dyn DataSource<SolarObservation>>>,
    ) -> Self {
        Self {
            cache,
            fetcher: FanoutFetcher::new(PER_SOURCE_DEADLINE, OVERALL_DEADLINE),
            sources,
        }
    }

    /// Current solar conditions, cache-through. Never errors; total upstream
    /// failure yields the uncached fallback payload.
    pub async fn current(&self) -> SolarConditions {
        if let Some(value) = self.cache.get(NAMESPACE, KEY) {
            if let Ok(payload) = serde_json::from_value(value) {
                return payload;
            }
        }

        let mut results = self.fetcher.collect(&self.sources).await;
        if results.is_empty() {
            warn!("All solar sources failed, serving fallback");
            return SolarConditions::fallback();
        }

        let payload = merge(&mut results);
        if let Ok(value) = serde_json::to_value(&payload) {
            self.cache.set(NAMESPACE, KEY, value, Some(TTL));
        }
        payload
    }
}

/// Field precedence: HamQSL wins every index it reports; NOAA contributes
/// the live Kp and backfills the K-index when HamQSL is absent. Insensitive
/// to source completion order.
fn merge(results: &mut FetchResults<SolarObservation>) -> SolarConditions {
    let source = results.source_names().join("+");
    let contributing = results.len();

    let hamqsl = results.take("HamQSL").and_then(|obs| match obs {
        SolarObservation::HamQsl(record) => Some(record),
        SolarObservation::Noaa(_) => None,
    });
    let noaa = results.take("NOAA").and_then(|obs| match obs {
        SolarObservation::Noaa(record) => Some(record),
        SolarObservation::HamQsl(_) => None,
    });

    let defaults = SolarConditions::fallback();
    let kp = noaa.as_ref().map(|n| n.kp);
    let (storm_activity, storm_probability) = storm_estimate(kp);

    let k_index = match (&hamqsl, kp) {
        (Some(record), _) => record.k_index.clone(),
        (None, Some(kp)) => format!("{}", kp.round() as i64),
        (None, None) => defaults.k_index.clone(),
    };

    SolarConditions {
        sfi: hamqsl
            .as_ref()
            .map(|r| r.solar_flux.clone())
            .unwrap_or(defaults.sfi),
        a_index: hamqsl
            .as_ref()
            .map(|r| r.a_index.clone())
            .unwrap_or(defaults.a_index),
        k_index,
        aurora: hamqsl
            .as_ref()
            .map(|r| r.aurora.clone())
            .unwrap_or(defaults.aurora),
        sunspots: hamqsl
            .as_ref()
            .map(|r| r.sunspots.clone())
            .unwrap_or(defaults.sunspots),
        xray: hamqsl
            .as_ref()
            .map(|r| r.xray.clone())
            .unwrap_or(defaults.xray),
        noaa_kp: kp,
        noaa_timestamp: noaa.map(|n| n.time_tag),
        storm_activity: storm_activity.to_string(),
        storm_probability: storm_probability.to_string(),
        timestamp: Utc::now(),
        source,
        confidence: if contributing >= 2 { 0.9 } else { 0.6 },
    }
}
