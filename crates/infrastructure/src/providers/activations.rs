use crate::cache::CacheStore;
use crate::fetch::{DataSource, FanoutFetcher};
use crate::sources::{PotaSource, SotaSource};
use chrono::Utc;
use propcast_domain::{Activation, ActivationKind, ActivationsReport};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const NAMESPACE: &str = "activations";
const KEY: &str = "combined";
const TTL: Duration = Duration::from_secs(180);
const PER_SOURCE_DEADLINE: Duration = Duration::from_secs(5);
const OVERALL_DEADLINE: Duration = Duration::from_secs(12);
const MAX_ACTIVATIONS: usize = 50;

/// Combined POTA and SOTA activator spots.
pub struct ActivationsProvider {
    cache: Arc<CacheStore>,
    fetcher: FanoutFetcher,
    sources: Vec<Arc<dyn DataSource<Vec<Activation>>>>,
}

impl ActivationsProvider {
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self::with_sources(cache, vec![Arc::new(PotaSource), Arc::new(SotaSource)])
    }

    pub fn with_sources(
        cache: Arc<CacheStore>,
        sources: Vec<Arc<dyn DataSource<Vec<Activation>>>>,
    ) -> Self {
        Self {
            cache,
            fetcher: FanoutFetcher::new(PER_SOURCE_DEADLINE, OVERALL_DEADLINE),
            sources,
        }
    }

    pub async fn current(&self) -> ActivationsReport {
        if let Some(value) = self.cache.get(NAMESPACE, KEY) {
            if let Ok(payload) = serde_json::from_value(value) {
                return payload;
            }
        }

        let results = self.fetcher.collect(&self.sources).await;
        if results.is_empty() {
            warn!("All activation sources failed, serving fallback");
            return ActivationsReport::fallback();
        }

        let source = results.source_names().join("+");
        let contributing = results.len();
        let mut merged: Vec<Activation> = results
            .iter()
            .flat_map(|(_, list)| list.iter().cloned())
            .collect();
        // Newest first; POTA/SOTA are equally authoritative so the union is
        // simply ordered by time.
        merged.sort_by(|a, b| b.time.cmp(&a.time));

        let pota_count = merged
            .iter()
            .filter(|a| a.kind == ActivationKind::Pota)
            .count();
        let sota_count = merged.len() - pota_count;
        let total_count = merged.len();
        merged.truncate(MAX_ACTIVATIONS);

        let payload = ActivationsReport {
            timestamp: Utc::now(),
            pota_count,
            sota_count,
            total_count,
            activations: merged,
            source,
            confidence: if contributing >= 2 { 0.8 } else { 0.6 },
        };
        if let Ok(value) = serde_json::to_value(&payload) {
            self.cache.set(NAMESPACE, KEY, value, Some(TTL));
        }
        payload
    }
}
