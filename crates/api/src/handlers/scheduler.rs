use crate::state::AppState;
use axum::{extract::State, Json};
use propcast_jobs::SchedulerStatus;
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_scheduler_status")]
pub async fn get_scheduler_status(State(state): State<AppState>) -> Json<SchedulerStatus> {
    debug!("Fetching scheduler status");
    Json(state.scheduler.status())
}
