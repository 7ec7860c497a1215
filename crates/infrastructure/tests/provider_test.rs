use async_trait::async_trait;
use propcast_domain::solar::{HamQslSolar, SolarObservation};
use propcast_domain::{DomainError, NoaaKIndex, WeatherConditions};
use propcast_infrastructure::providers::{SolarProvider, WeatherProvider};
use propcast_infrastructure::{CacheStore, DataSource, NamespaceConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn registered_store() -> Arc<CacheStore> {
    let store = CacheStore::new();
    store.register(
        "solar",
        NamespaceConfig::new(10, 1024 * 1024, Duration::from_secs(300)),
    );
    store.register(
        "weather",
        NamespaceConfig::new(20, 1024 * 1024, Duration::from_secs(600)),
    );
    Arc::new(store)
}

struct MockHamQsl {
    calls: Arc<AtomicU64>,
}

#[async_trait]
impl DataSource<SolarObservation> for MockHamQsl {
    fn name(&self) -> &'static str {
        "HamQSL"
    }

    async fn fetch(&self) -> Result<SolarObservation, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SolarObservation::HamQsl(HamQslSolar {
            solar_flux: "142 SFI".to_string(),
            a_index: "8".to_string(),
            k_index: "3".to_string(),
            aurora: "1".to_string(),
            sunspots: "95".to_string(),
            xray: "B4.2".to_string(),
        }))
    }
}

struct MockNoaa {
    kp: f64,
}

#[async_trait]
impl DataSource<SolarObservation> for MockNoaa {
    fn name(&self) -> &'static str {
        "NOAA"
    }

    async fn fetch(&self) -> Result<SolarObservation, DomainError> {
        Ok(SolarObservation::Noaa(NoaaKIndex {
            kp: self.kp,
            time_tag: "2026-08-26T12:00:00".to_string(),
        }))
    }
}

struct DownSource {
    calls: Arc<AtomicU64>,
}

#[async_trait]
impl DataSource<SolarObservation> for DownSource {
    fn name(&self) -> &'static str {
        "HamQSL"
    }

    async fn fetch(&self) -> Result<SolarObservation, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::SourceUnavailable("HamQSL".into()))
    }
}

#[tokio::test]
async fn merged_solar_prefers_hamqsl_and_keeps_noaa_kp() {
    let cache = registered_store();
    let calls = Arc::new(AtomicU64::new(0));
    let provider = SolarProvider::with_sources(
        Arc::clone(&cache),
        vec![
            Arc::new(MockHamQsl {
                calls: Arc::clone(&calls),
            }),
            Arc::new(MockNoaa { kp: 6.3 }),
        ],
    );

    let conditions = provider.current().await;
    assert_eq!(conditions.sfi, "142 SFI");
    // HamQSL's K-index wins even with a live NOAA Kp present.
    assert_eq!(conditions.k_index, "3");
    assert_eq!(conditions.noaa_kp, Some(6.3));
    assert_eq!(conditions.storm_activity, "storm");
    assert_eq!(conditions.source, "HamQSL+NOAA");
    assert!((conditions.confidence - 0.9).abs() < f32::EPSILON);
}

#[tokio::test]
async fn noaa_alone_backfills_the_k_index() {
    let cache = registered_store();
    let provider =
        SolarProvider::with_sources(Arc::clone(&cache), vec![Arc::new(MockNoaa { kp: 2.7 })]);

    let conditions = provider.current().await;
    assert_eq!(conditions.k_index, "3");
    assert_eq!(conditions.noaa_kp, Some(2.7));
    assert_eq!(conditions.source, "NOAA");
    assert!((conditions.confidence - 0.6).abs() < f32::EPSILON);
    // Unreported indices come from the quiet-day defaults.
    assert_eq!(conditions.sfi, "100 SFI");
}

#[tokio::test]
async fn second_call_is_served_from_cache() {
    let cache = registered_store();
    let calls = Arc::new(AtomicU64::new(0));
    let provider = SolarProvider::with_sources(
        Arc::clone(&cache),
        vec![Arc::new(MockHamQsl {
            calls: Arc::clone(&calls),
        })],
    );

    let first = provider.current().await;
    let second = provider.current().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.sfi, second.sfi);
    assert_eq!(first.timestamp, second.timestamp);
}

#[tokio::test]
async fn total_failure_serves_fallback_without_caching_it() {
    let cache = registered_store();
    let calls = Arc::new(AtomicU64::new(0));
    let provider = SolarProvider::with_sources(
        Arc::clone(&cache),
        vec![Arc::new(DownSource {
            calls: Arc::clone(&calls),
        })],
    );

    let first = provider.current().await;
    assert!((first.confidence - 0.3).abs() < f32::EPSILON);
    assert_eq!(first.source, "Fallback");

    // The fallback never lands in the cache, so the source is retried.
    let second = provider.current().await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!((second.confidence - 0.3).abs() < f32::EPSILON);
    assert_eq!(cache.stats().total_entries, 0);
}

struct MockWeather;

#[async_trait]
impl DataSource<WeatherConditions> for MockWeather {
    fn name(&self) -> &'static str {
        "OpenWeatherMap"
    }

    async fn fetch(&self) -> Result<WeatherConditions, DomainError> {
        let mut conditions = WeatherConditions::fallback("F");
        conditions.temperature = 81.5;
        conditions.city = "Hartford".to_string();
        conditions.source = "OpenWeatherMap".to_string();
        conditions.confidence = 0.9;
        Ok(conditions)
    }
}

#[tokio::test]
async fn weather_cache_key_is_location_scoped() {
    let cache = registered_store();
    let hartford = WeatherProvider::with_sources(
        Arc::clone(&cache),
        vec![Arc::new(MockWeather)],
        41.7148,
        -72.7279,
        "F",
    );
    let denver = WeatherProvider::with_sources(
        Arc::clone(&cache),
        vec![Arc::new(MockWeather)],
        39.7392,
        -104.9903,
        "F",
    );

    let _ = hartford.current().await;
    let _ = denver.current().await;

    // Two locations, two cache entries in the weather namespace.
    assert_eq!(cache.stats().namespaces["weather"].entries, 2);
}

#[tokio::test]
async fn weather_fallback_uses_configured_unit() {
    let cache = registered_store();
    let provider =
        WeatherProvider::with_sources(Arc::clone(&cache), vec![], 41.7148, -72.7279, "C");

    let conditions = provider.current().await;
    assert_eq!(conditions.temp_unit, "C");
    assert_eq!(conditions.temperature, 22.0);
    assert!((conditions.confidence - 0.3).abs() < f32::EPSILON);
}
