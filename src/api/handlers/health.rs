//! Health check endpoint.

use axum::{extract::State, Json};
use tracing::instrument;

use crate::api::models::{HealthResponse, HealthStatus};
use crate::app_state::AppState;

/// Returns service health information.
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
