//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, QrService, RedirectService, StatsService};

/// Handles to the application services, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub links: Arc<LinkService>,
    pub redirects: Arc<RedirectService>,
    pub stats: Arc<StatsService>,
    pub qr: Arc<QrService>,
    /// When true, visitor IPs come from proxy headers.
    pub behind_proxy: bool,
    /// Label of the active storage backend, reported by the health endpoint.
    pub storage_backend: &'static str,
}
