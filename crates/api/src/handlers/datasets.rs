use crate::state::AppState;
use axum::{extract::State, Json};
use propcast_domain::{
    ActivationsReport, ContestCalendar, PropagationReport, SolarConditions, SpotsReport,
    WeatherConditions,
};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_conditions")]
pub async fn get_conditions(State(state): State<AppState>) -> Json<PropagationReport> {
    debug!("Fetching full conditions report");
    Json(state.report.assemble().await)
}

#[instrument(skip(state), name = "api_get_solar")]
pub async fn get_solar(State(state): State<AppState>) -> Json<SolarConditions> {
    debug!("Fetching solar conditions");
    Json(state.report.solar.current().await)
}

#[instrument(skip(state), name = "api_get_weather")]
pub async fn get_weather(State(state): State<AppState>) -> Json<WeatherConditions> {
    debug!("Fetching weather conditions");
    Json(state.report.weather.current().await)
}

#[instrument(skip(state), name = "api_get_spots")]
pub async fn get_spots(State(state): State<AppState>) -> Json<SpotsReport> {
    debug!("Fetching live spots");
    Json(state.report.spots.current().await)
}

#[instrument(skip(state), name = "api_get_activations")]
pub async fn get_activations(State(state): State<AppState>) -> Json<ActivationsReport> {
    debug!("Fetching activations");
    Json(state.report.activations.current().await)
}

#[instrument(skip(state), name = "api_get_contests")]
pub async fn get_contests(State(state): State<AppState>) -> Json<ContestCalendar> {
    debug!("Fetching contest calendar");
    Json(state.report.contests.current().await)
}
