//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend, applies migrations, wires the services, and
//! runs the Axum server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;

use crate::application::services::{LinkService, QrService, RedirectService, StatsService};
use crate::config::Config;
use crate::domain::locks::LinkLocks;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::persistence::{MemoryBackend, PgClickRepository, PgLinkRepository};
use crate::infrastructure::qr::PngQrRenderer;
use crate::routes::app_router;
use crate::state::AppState;

/// Builds the application state for the configured storage backend.
///
/// With `DATABASE_URL` set, connects a PostgreSQL pool and applies
/// migrations; otherwise the service runs entirely in memory.
///
/// # Errors
///
/// Returns an error if the database connection or a migration fails.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let (links, clicks, storage_backend): (
        Arc<dyn LinkRepository>,
        Arc<dyn ClickRepository>,
        &'static str,
    ) = if let Some(database_url) = &config.database_url {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .connect(database_url)
            .await?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        let pool = Arc::new(pool);
        (
            Arc::new(PgLinkRepository::new(pool.clone())),
            Arc::new(PgClickRepository::new(pool)),
            "postgres",
        )
    } else {
        tracing::warn!("DATABASE_URL not set, links will not survive a restart");
        let backend = Arc::new(MemoryBackend::new());
        (backend.clone(), backend, "memory")
    };

    let locks = Arc::new(LinkLocks::new());

    let link_service = Arc::new(LinkService::new(
        links.clone(),
        locks.clone(),
        config.token_policy,
    ));
    let redirect_service = Arc::new(RedirectService::new(links.clone(), clicks.clone(), locks));
    let stats_service = Arc::new(StatsService::new(links.clone(), clicks));
    let qr_service = Arc::new(QrService::new(
        links,
        Arc::new(PngQrRenderer::new()),
        config.base_url.clone(),
    ));

    Ok(AppState {
        links: link_service,
        redirects: redirect_service,
        stats: stats_service,
        qr: qr_service,
        behind_proxy: config.behind_proxy,
        storage_backend,
    })
}

/// Runs the HTTP server until shutdown.
///
/// # Errors
///
/// Returns an error if the backend setup, the bind, or the server runtime
/// fails.
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutting down");
}
