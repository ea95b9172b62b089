//! DTO for the health endpoint.

use serde::Serialize;

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Which storage backend the service is running on.
    pub storage: &'static str,
}
