use crate::cache::CacheStore;
use crate::providers::{
    ActivationsProvider, ContestsProvider, SolarProvider, SpotsProvider, WeatherProvider,
};
use chrono::Utc;
use propcast_domain::PropagationReport;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const NAMESPACE: &str = "conditions";
const KEY: &str = "current";
const TTL: Duration = Duration::from_secs(600);

/// Assembles the full dashboard report from every provider.
///
/// Providers are queried concurrently; each already degrades to its own
/// fallback, so assembly never errors. The assembled report is cached for
/// 10 minutes on top of the per-dataset caches.
pub struct ReportAssembler {
    cache: Arc<CacheStore>,
    station_grid: String,
    pub solar: SolarProvider,
    pub weather: WeatherProvider,
    pub spots: SpotsProvider,
    pub activations: ActivationsProvider,
    pub contests: ContestsProvider,
}

impl ReportAssembler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cache: Arc<CacheStore>,
        station_grid: &str,
        solar: SolarProvider,
        weather: WeatherProvider,
        spots: SpotsProvider,
        activations: ActivationsProvider,
        contests: ContestsProvider,
    ) -> Self {
        Self {
            cache,
            station_grid: station_grid.to_string(),
            solar,
            weather,
            spots,
            activations,
            contests,
        }
    }

    pub async fn assemble(&self) -> PropagationReport {
        if let Some(value) = self.cache.get(NAMESPACE, KEY) {
            if let Ok(report) = serde_json::from_value(value) {
                return report;
            }
        }
        self.refresh().await
    }

    /// Assemble a fresh composite, skipping the composite cache read. The
    /// pre-warm job uses this so a still-valid cached copy does not turn the
    /// refresh into a no-op; the per-dataset caches still apply.
    pub async fn refresh(&self) -> PropagationReport {
        let (solar, weather, spots, activations, contests) = tokio::join!(
            self.solar.current(),
            self.weather.current(),
            self.spots.current(),
            self.activations.current(),
            self.contests.current(),
        );

        let report = PropagationReport {
            timestamp: Utc::now(),
            station_grid: self.station_grid.clone(),
            solar,
            weather,
            spots,
            activations,
            contests,
        };
        if let Ok(value) = serde_json::to_value(&report) {
            self.cache.set(NAMESPACE, KEY, value, Some(TTL));
        }
        info!("Assembled new conditions report");
        report
    }
}
