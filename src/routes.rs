//! Router configuration.
//!
//! # Route Structure
//!
//! - `POST /create`                 - Create a short link
//! - `GET  /statistics/{link_id}`   - Unique/total click counts
//! - `GET  /qrcode/{link_id}`       - QR code of the short link
//! - `GET  /health`                 - Health check
//! - `GET  /{token}`                - Redirect (records a click)
//! - `PUT  /{link_id}`              - Partial link update
//!
//! The fixed segments are reserved token values, so they can never be
//! shadowed by a link. Resolution and update share the trailing wildcard
//! route; the update handler requires a numeric id.

use axum::routing::{get, post};
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{
    create_link_handler, health_handler, qr_code_handler, redirect_handler, stats_handler,
    update_link_handler,
};
use crate::api::middleware;
use crate::state::AppState;

/// All application routes with state applied.
///
/// Kept separate from [`app_router`] so tests can mount the bare router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/create", post(create_link_handler))
        .route("/statistics/{link_id}", get(stats_handler))
        .route("/qrcode/{link_id}", get(qr_code_handler))
        .route("/health", get(health_handler))
        .route(
            "/{token}",
            get(redirect_handler).put(update_link_handler),
        )
        .with_state(state)
}

/// The full application service: routes, request tracing, and
/// trailing-slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = router(state).layer(middleware::tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
