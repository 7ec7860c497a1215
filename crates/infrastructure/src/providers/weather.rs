use crate::cache::CacheStore;
use crate::fetch::{DataSource, FanoutFetcher};
use crate::sources::OpenWeatherSource;
use propcast_domain::WeatherConditions;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const NAMESPACE: &str = "weather";
const TTL: Duration = Duration::from_secs(1800);
const PER_SOURCE_DEADLINE: Duration = Duration::from_secs(5);
const OVERALL_DEADLINE: Duration = Duration::from_secs(8);

/// Station weather from OpenWeatherMap. Single source today, but run through
/// the same fan-out path as every other dataset.
pub struct WeatherProvider {
    cache: Arc<CacheStore>,
    fetcher: FanoutFetcher,
    sources: Vec<Arc<dyn DataSource<WeatherConditions>>>,
    cache_key: String,
    temp_unit: String,
}

impl WeatherProvider {
    pub fn new(
        cache: Arc<CacheStore>,
        latitude: f64,
        longitude: f64,
        api_key: Option<String>,
        temp_unit: &str,
    ) -> Self {
        let source = OpenWeatherSource::new(latitude, longitude, api_key, temp_unit);
        Self::with_sources(cache, vec![Arc::new(source)], latitude, longitude, temp_unit)
    }

    pub fn with_sources(
        cache: Arc<CacheStore>,
        sources: Vec<Arc<dyn DataSource<WeatherConditions>>>,
        latitude: f64,
        longitude: f64,
        temp_unit: &str,
    ) -> Self {
        Self {
            cache,
            fetcher: FanoutFetcher::new(PER_SOURCE_DEADLINE, OVERALL_DEADLINE),
            sources,
            // Location-scoped key: stations sharing a store never see each
            // other's weather.
            cache_key: format!("conditions_{latitude}_{longitude}"),
            temp_unit: temp_unit.to_string(),
        }
    }

    pub async fn current(&self) -> WeatherConditions {
        if let Some(value) = self.cache.get(NAMESPACE, &self.cache_key) {
            if let Ok(payload) = serde_json::from_value(value) {
                return payload;
            }
        }

        let mut results = self.fetcher.collect(&self.sources).await;
        let Some(payload) = results.take("OpenWeatherMap") else {
            warn!("Weather source failed, serving fallback");
            return WeatherConditions::fallback(&self.temp_unit);
        };

        if let Ok(value) = serde_json::to_value(&payload) {
            self.cache.set(NAMESPACE, &self.cache_key, value, Some(TTL));
        }
        payload
    }
}
