#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use tower::Layer;

use linkstub::application::services::{
    CreateLink, LinkService, QrService, RedirectService, StatsService,
};
use linkstub::config::TokenPolicy;
use linkstub::domain::entities::Link;
use linkstub::domain::locks::LinkLocks;
use linkstub::domain::repositories::{ClickRepository, LinkRepository};
use linkstub::infrastructure::persistence::MemoryBackend;
use linkstub::infrastructure::qr::PngQrRenderer;
use linkstub::routes::router;
use linkstub::state::AppState;

/// Layer injecting a fixed peer address, standing in for a real socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Builds the application state over a fresh in-memory backend.
///
/// With `behind_proxy` set, tests can pick the visitor IP per request via
/// the `X-Forwarded-For` header.
pub fn create_test_state(
    token_policy: TokenPolicy,
    behind_proxy: bool,
) -> (AppState, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let links: Arc<dyn LinkRepository> = backend.clone();
    let clicks: Arc<dyn ClickRepository> = backend.clone();
    let locks = Arc::new(LinkLocks::new());

    let state = AppState {
        links: Arc::new(LinkService::new(links.clone(), locks.clone(), token_policy)),
        redirects: Arc::new(RedirectService::new(links.clone(), clicks.clone(), locks)),
        stats: Arc::new(StatsService::new(links.clone(), clicks)),
        qr: Arc::new(QrService::new(
            links,
            Arc::new(PngQrRenderer::new()),
            "http://localhost:3000".to_string(),
        )),
        behind_proxy,
        storage_backend: "memory",
    };

    (state, backend)
}

pub fn test_server(state: AppState) -> TestServer {
    let app = router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Creates a link through the registry, panicking on failure.
pub async fn create_link(
    state: &AppState,
    token: &str,
    expiration_minutes: i64,
    max_unique_clicks: Option<i64>,
) -> Link {
    state
        .links
        .create_link(CreateLink {
            token: Some(token.to_string()),
            redirect_link: "https://example.com/target".to_string(),
            expiration_minutes,
            max_unique_clicks,
        })
        .await
        .unwrap()
}

/// Extracts the machine-readable error code from an error body.
pub fn error_code(body: &serde_json::Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
