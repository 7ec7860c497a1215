use crate::cache::CacheStore;
use crate::fetch::{DataSource, FanoutFetcher, FetchResults};
use crate::sources::{PskReporterSource, WsprNetSource};
use chrono::Utc;
use propcast_domain::spots::analyze_band_activity;
use propcast_domain::{Spot, SpotBatch, SpotsReport, SpotsSummary};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const NAMESPACE: &str = "spots";
const TTL: Duration = Duration::from_secs(300);
const PER_SOURCE_DEADLINE: Duration = Duration::from_secs(5);
const OVERALL_DEADLINE: Duration = Duration::from_secs(8);
const MAX_SPOTS: usize = 100;

/// Live station activity merged from the spotting networks.
pub struct SpotsProvider {
    cache: Arc<CacheStore>,
    fetcher: FanoutFetcher,
    sources: Vec<Arc<dyn DataSource<SpotBatch>>>,
    cache_key: String,
}

impl SpotsProvider {
    pub fn new(cache: Arc<CacheStore>, grid: &str) -> Self {
        Self::with_sources(
            cache,
            vec![Arc::new(PskReporterSource), Arc::new(WsprNetSource)],
            grid,
        )
    }

    pub fn with_sources(
        cache: Arc<CacheStore>,
        sources: Vec<Arc<dyn DataSource<SpotBatch>>>,
        grid: &str,
    ) -> Self {
        Self {
            cache,
            fetcher: FanoutFetcher::new(PER_SOURCE_DEADLINE, OVERALL_DEADLINE),
            sources,
            cache_key: format!("live_activity_{grid}"),
        }
    }

    pub async fn current(&self) -> SpotsReport {
        if let Some(value) = self.cache.get(NAMESPACE, &self.cache_key) {
            if let Ok(payload) = serde_json::from_value(value) {
                return payload;
            }
        }

        let results = self.fetcher.collect(&self.sources).await;
        if results.is_empty() {
            warn!("All spot sources failed, serving fallback");
            return SpotsReport::fallback();
        }

        let payload = merge(&results);
        if let Ok(value) = serde_json::to_value(&payload) {
            self.cache.set(NAMESPACE, &self.cache_key, value, Some(TTL));
        }
        payload
    }
}

/// Union merge: every source's spots are kept, summaries are derived from the
/// union, and per-source counts are recorded. Spot lists don't overlap
/// field-wise, so no precedence is needed here.
fn merge(results: &FetchResults<SpotBatch>) -> SpotsReport {
    let sources = results.source_names();
    let source_counts: BTreeMap<String, usize> = results
        .iter()
        .map(|(name, batch)| (name.clone(), batch.count))
        .collect();

    let mut all_spots: Vec<Spot> = results
        .iter()
        .flat_map(|(_, batch)| batch.spots.iter().cloned())
        .collect();
    let total_spots = all_spots.len();

    let band_activity = analyze_band_activity(&all_spots);
    let active_bands = band_activity.values().filter(|b| b.count > 0).count();

    let mut mode_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut dxcc_entities: BTreeSet<&str> = BTreeSet::new();
    for spot in &all_spots {
        *mode_breakdown.entry(spot.mode.clone()).or_default() += 1;
        if !spot.dxcc.is_empty() {
            dxcc_entities.insert(&spot.dxcc);
        }
    }
    let active_dxcc = dxcc_entities.len();

    all_spots.sort_by(|a, b| {
        b.frequency
            .partial_cmp(&a.frequency)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    all_spots.truncate(MAX_SPOTS);

    SpotsReport {
        timestamp: Utc::now(),
        confidence: if sources.len() >= 2 { 0.8 } else { 0.6 },
        sources,
        source_counts,
        total_spots,
        summary: SpotsSummary {
            total_spots,
            active_bands,
            active_modes: mode_breakdown.len(),
            active_dxcc,
        },
        spots: all_spots,
        band_activity,
        mode_breakdown,
    }
}
