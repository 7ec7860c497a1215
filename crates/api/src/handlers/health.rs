use crate::{dto::HealthResponse, state::AppState};
use axum::{extract::State, Json};
use tracing::debug;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        station_grid: state.config.station.grid.clone(),
        scheduler_running: state.scheduler.is_running(),
    })
}
