//! Handler for short link resolution.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Resolves a token and redirects to its target.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// # Request Flow
///
/// 1. Determine the visitor IP (peer address, or proxy headers when
///    configured)
/// 2. Run the click recorder: count uniques, evaluate resolvability, and
///    record the click as one unit per link
/// 3. Return 307 Temporary Redirect to the stored target
///
/// A rejected request records nothing.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown token and 410 Gone when the link is
/// expired, over its unique click cap, or deactivated (distinct error codes
/// in the body).
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let visitor_ip = client_ip(&headers, addr, state.behind_proxy);

    let target = state.redirects.record_and_check(&token, &visitor_ip).await?;

    Ok(Redirect::temporary(&target))
}
