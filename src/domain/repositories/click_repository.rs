//! Repository trait for click storage and counting.

use async_trait::async_trait;

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;

/// Storage interface for click events.
///
/// Clicks are append-only rows. Counts are always computed against storage,
/// never cached: the click recorder re-counts inside its per-link critical
/// section, so the store stays the single source of truth.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryBackend`] - in-memory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends one click row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Counts distinct visitor IPs recorded for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_unique_ips(&self, link_id: i64) -> Result<i64, AppError>;

    /// Counts every click row for a link, same-IP repeats included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_total(&self, link_id: i64) -> Result<i64, AppError>;
}
