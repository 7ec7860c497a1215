use propcast_api::AppState;
use propcast_domain::Config;
use propcast_infrastructure::providers::{
    ActivationsProvider, ContestsProvider, SolarProvider, SpotsProvider, WeatherProvider,
};
use propcast_infrastructure::{CacheStore, NamespaceConfig, ReportAssembler};
use propcast_jobs::{cache_sweep_task, conditions_refresh_task, TaskScheduler};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Cache namespaces and their policies. TTLs here are the namespace defaults;
/// providers pass explicit per-entry TTLs on top.
const NAMESPACES: &[(&str, usize, usize, u64)] = &[
    ("solar", 10, 1024 * 1024, 300),
    ("weather", 20, 1024 * 1024, 1800),
    ("spots", 50, 5 * 1024 * 1024, 300),
    ("activations", 10, 2 * 1024 * 1024, 180),
    ("contests", 10, 1024 * 1024, 1800),
    ("conditions", 10, 10 * 1024 * 1024, 600),
];

/// Wire the full object graph: cache, providers, assembler, scheduler.
pub fn build_state(config: Config) -> AppState {
    let cache = Arc::new(CacheStore::new());
    for (namespace, max_entries, max_memory, ttl_secs) in NAMESPACES {
        cache.register(
            namespace,
            NamespaceConfig::new(*max_entries, *max_memory, Duration::from_secs(*ttl_secs)),
        );
    }

    let station = &config.station;
    let report = Arc::new(ReportAssembler::new(
        Arc::clone(&cache),
        &station.grid,
        SolarProvider::new(Arc::clone(&cache)),
        WeatherProvider::new(
            Arc::clone(&cache),
            station.latitude,
            station.longitude,
            config.weather.api_key.clone(),
            &config.weather.temp_unit,
        ),
        SpotsProvider::new(Arc::clone(&cache), &station.grid),
        ActivationsProvider::new(Arc::clone(&cache)),
        ContestsProvider::new(Arc::clone(&cache)),
    ));

    let scheduler = Arc::new(TaskScheduler::new());
    scheduler.add_task(
        "cache_sweep",
        cache_sweep_task(Arc::clone(&cache)),
        Duration::from_secs(config.jobs.sweep_interval_secs),
    );
    scheduler.add_task(
        "conditions_refresh",
        conditions_refresh_task(Arc::clone(&report)),
        Duration::from_secs(config.jobs.refresh_interval_secs),
    );

    info!(
        namespaces = NAMESPACES.len(),
        grid = %station.grid,
        "Application services wired"
    );

    AppState {
        report,
        cache,
        scheduler,
        config: Arc::new(config),
    }
}
