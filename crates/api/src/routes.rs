use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Creates all API routes with state
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/conditions", get(handlers::get_conditions))
        .route("/solar", get(handlers::get_solar))
        .route("/weather", get(handlers::get_weather))
        .route("/spots", get(handlers::get_spots))
        .route("/activations", get(handlers::get_activations))
        .route("/contests", get(handlers::get_contests))
        .route("/cache/stats", get(handlers::get_cache_stats))
        .route("/cache/clear", post(handlers::clear_cache))
        .route("/scheduler", get(handlers::get_scheduler_status))
        .with_state(state)
}
