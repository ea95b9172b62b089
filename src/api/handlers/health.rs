//! Handler for the health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns service status and the active storage backend.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage_backend,
    })
}
