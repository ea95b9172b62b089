//! Handler for QR code rendering.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::qrcode::QrCodeResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Renders a link's resolution URL as a QR code.
///
/// # Endpoint
///
/// `GET /qrcode/{link_id}`
///
/// # Response
///
/// ```json
/// { "content_image": "<base64 PNG>" }
/// ```
///
/// The QR payload is the short link itself (`BASE_URL/{token}`), not the
/// redirect target, so scans go through click accounting. A rendering
/// failure degrades to an empty `content_image` instead of failing the
/// request.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn qr_code_handler(
    Path(link_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<QrCodeResponse>, AppError> {
    let content_image = state.qr.qr_code(link_id).await?;

    Ok(Json(QrCodeResponse { content_image }))
}
