//! QR code flow for short links.

use std::sync::Arc;

use base64::Engine as _;
use serde_json::json;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::qr::QrRenderer;

/// Produces base64 PNG QR codes for links.
///
/// The encoded payload is always the fully-qualified resolution URL of the
/// link's token, never the redirect target, so scanning routes the visitor
/// through click accounting.
pub struct QrService {
    links: Arc<dyn LinkRepository>,
    renderer: Arc<dyn QrRenderer>,
    base_url: String,
}

impl QrService {
    pub fn new(links: Arc<dyn LinkRepository>, renderer: Arc<dyn QrRenderer>, base_url: String) -> Self {
        Self {
            links,
            renderer,
            base_url,
        }
    }

    /// Renders the link's resolution URL as a base64-encoded PNG.
    ///
    /// A renderer failure does not fail the request: it is logged and the
    /// image payload degrades to empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has `link_id`.
    pub async fn qr_code(&self, link_id: i64) -> Result<String, AppError> {
        let link = self.links.find_by_id(link_id).await?.ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "link_id": link_id }))
        })?;

        let payload = self.resolution_url(&link.token);

        let image = match self.renderer.render(&payload) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    link_id,
                    error = %e,
                    "qr rendering failed, returning empty image"
                );
                Vec::new()
            }
        };

        Ok(base64::engine::general_purpose::STANDARD.encode(image))
    }

    /// Fully-qualified URL that resolves the token.
    fn resolution_url(&self, token: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), token)
    }
}
