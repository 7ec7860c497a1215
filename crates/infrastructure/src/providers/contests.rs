use crate::cache::CacheStore;
use crate::fetch::{DataSource, FanoutFetcher};
use crate::sources::ContestCalendarSource;
use chrono::Utc;
use propcast_domain::{Contest, ContestCalendar, ContestStatus};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const NAMESPACE: &str = "contests";
const KEY: &str = "current";
const TTL: Duration = Duration::from_secs(1800);
const PER_SOURCE_DEADLINE: Duration = Duration::from_secs(5);
const OVERALL_DEADLINE: Duration = Duration::from_secs(10);
const MAX_CONTESTS: usize = 10;

/// Current and upcoming contests from the WA7BNM calendar.
pub struct ContestsProvider {
    cache: Arc<CacheStore>,
    fetcher: FanoutFetcher,
    sources: Vec<Arc<dyn DataSource<Vec<Contest>>>>,
}

impl ContestsProvider {
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self::with_sources(cache, vec![Arc::new(ContestCalendarSource)])
    }

    pub fn with_sources(
        cache: Arc<CacheStore>,
        sources: Vec<Arc<dyn DataSource<Vec<Contest>>>>,
    ) -> Self {
        Self {
            cache,
            fetcher: FanoutFetcher::new(PER_SOURCE_DEADLINE, OVERALL_DEADLINE),
            sources,
        }
    }

    pub async fn current(&self) -> ContestCalendar {
        if let Some(value) = self.cache.get(NAMESPACE, KEY) {
            if let Ok(payload) = serde_json::from_value(value) {
                return payload;
            }
        }

        let mut results = self.fetcher.collect(&self.sources).await;
        let Some(contests) = results.take("WA7BNM") else {
            warn!("Contest calendar source failed, serving fallback");
            return ContestCalendar::fallback();
        };

        let active_count = contests
            .iter()
            .filter(|c| c.status == ContestStatus::Active)
            .count();
        let upcoming_count = contests
            .iter()
            .filter(|c| c.status == ContestStatus::Upcoming)
            .count();

        let payload = ContestCalendar {
            timestamp: Utc::now(),
            contests: contests.into_iter().take(MAX_CONTESTS).collect(),
            active_count,
            upcoming_count,
            source: "WA7BNM".to_string(),
            confidence: 0.9,
        };
        if let Ok(value) = serde_json::to_value(&payload) {
            self.cache.set(NAMESPACE, KEY, value, Some(TTL));
        }
        payload
    }
}
