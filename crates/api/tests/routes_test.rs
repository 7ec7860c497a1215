use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use propcast_api::{create_api_routes, AppState};
use propcast_domain::Config;
use propcast_infrastructure::providers::{
    ActivationsProvider, ContestsProvider, SolarProvider, SpotsProvider, WeatherProvider,
};
use propcast_infrastructure::{CacheStore, NamespaceConfig, ReportAssembler};
use propcast_jobs::TaskScheduler;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// State with every provider wired to an empty source list, so every dataset
/// resolves to its fallback without touching the network.
fn offline_state() -> AppState {
    let cache = Arc::new(CacheStore::new());
    for namespace in ["solar", "weather", "spots", "activations", "contests", "conditions"] {
        cache.register(
            namespace,
            NamespaceConfig::new(10, 1024 * 1024, Duration::from_secs(300)),
        );
    }

    let config = Arc::new(Config::default());
    let report = ReportAssembler::new(
        Arc::clone(&cache),
        &config.station.grid,
        SolarProvider::with_sources(Arc::clone(&cache), vec![]),
        WeatherProvider::with_sources(
            Arc::clone(&cache),
            vec![],
            config.station.latitude,
            config.station.longitude,
            &config.weather.temp_unit,
        ),
        SpotsProvider::with_sources(Arc::clone(&cache), vec![], &config.station.grid),
        ActivationsProvider::with_sources(Arc::clone(&cache), vec![]),
        ContestsProvider::with_sources(Arc::clone(&cache), vec![]),
    );

    AppState {
        report: Arc::new(report),
        cache,
        scheduler: Arc::new(TaskScheduler::new()),
        config,
    }
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
    let response = create_api_routes(state)
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_status_and_grid() {
    let (status, body) = get_json(offline_state(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["station_grid"], "FN31pr");
    assert_eq!(body["scheduler_running"], false);
}

#[tokio::test]
async fn conditions_returns_a_complete_report_offline() {
    let (status, body) = get_json(offline_state(), "/conditions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["station_grid"], "FN31pr");
    // Every section degrades to its own fallback.
    assert_eq!(body["solar"]["source"], "Fallback");
    assert_eq!(body["weather"]["temp_unit"], "F");
    assert_eq!(body["spots"]["spots"], json!([]));
    assert!(body["contests"]["contests"].is_array());
}

#[tokio::test]
async fn solar_endpoint_serves_fallback_offline() {
    let (status, body) = get_json(offline_state(), "/solar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sfi"], "100 SFI");
    assert!((body["confidence"].as_f64().unwrap() - 0.3).abs() < 1e-6);
}

#[tokio::test]
async fn cache_stats_lists_registered_namespaces() {
    let (status, body) = get_json(offline_state(), "/cache/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_namespaces"], 6);
    assert!(body["namespaces"]["solar"].is_object());
}

#[tokio::test]
async fn cache_clear_accepts_namespace_and_empty_body() {
    let state = offline_state();
    state.cache.set("solar", "conditions", json!(1), None);
    state.cache.set("spots", "live", json!(2), None);

    let response = create_api_routes(state.clone())
        .oneshot(
            Request::post("/cache/clear")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"namespace":"solar"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.cache.get("solar", "conditions"), None);
    assert_eq!(state.cache.get("spots", "live"), Some(json!(2)));

    let response = create_api_routes(state.clone())
        .oneshot(Request::post("/cache/clear").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.cache.stats().total_entries, 0);
}

#[tokio::test]
async fn scheduler_status_lists_tasks() {
    let state = offline_state();
    let cache = Arc::clone(&state.cache);
    state.scheduler.add_task(
        "cache_sweep",
        propcast_jobs::cache_sweep_task(cache),
        Duration::from_secs(300),
    );

    let (status, body) = get_json(state, "/scheduler").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["running"], false);
    assert_eq!(body["tasks"]["cache_sweep"]["interval_secs"], 300);
    assert_eq!(body["tasks"]["cache_sweep"]["run_count"], 0);
}
