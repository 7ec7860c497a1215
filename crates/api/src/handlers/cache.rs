use crate::{
    dto::{ClearCacheRequest, ClearCacheResponse},
    state::AppState,
};
use axum::{extract::State, Json};
use propcast_infrastructure::cache::CacheStats;
use tracing::{debug, info, instrument};

#[instrument(skip(state), name = "api_get_cache_stats")]
pub async fn get_cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    debug!("Fetching cache statistics");
    Json(state.cache.stats())
}

#[instrument(skip(state), name = "api_clear_cache")]
pub async fn clear_cache(
    State(state): State<AppState>,
    request: Option<Json<ClearCacheRequest>>,
) -> Json<ClearCacheResponse> {
    let namespace = request.and_then(|Json(request)| request.namespace);
    match namespace {
        Some(namespace) => {
            info!(namespace = %namespace, "Clearing cache namespace");
            state.cache.clear(&namespace);
            Json(ClearCacheResponse { cleared: namespace })
        }
        None => {
            info!("Clearing all cache namespaces");
            state.cache.clear_all();
            Json(ClearCacheResponse {
                cleared: "all".to_string(),
            })
        }
    }
}
