//! Repository trait for link storage.

use async_trait::async_trait;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;

/// Storage interface for links.
///
/// Implementations hold no business logic; resolvability rules and token
/// policy live in the domain and service layers. Token uniqueness, however,
/// is enforced here: `create` and `update` must check-and-write atomically so
/// concurrent writers racing on the same token value cannot both win.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryBackend`] - in-memory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link with `active = true`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token is already taken and
    /// [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its token (case-sensitive exact match).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, AppError>;

    /// Applies the present fields of `patch` to the link with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has `id`,
    /// [`AppError::Conflict`] if the patch moves the token onto a value owned
    /// by another link, and [`AppError::Internal`] on storage errors.
    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError>;
}
