//! DTO for the QR code endpoint.

use serde::Serialize;

/// Response body for `GET /qrcode/{link_id}`.
#[derive(Debug, Serialize)]
pub struct QrCodeResponse {
    /// Base64-encoded PNG of the link's resolution URL. Empty when
    /// rendering degraded.
    pub content_image: String,
}
