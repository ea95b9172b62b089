//! PostgreSQL implementation of the link repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Returns true if `e` is a unique violation on the token index.
pub(crate) fn is_unique_violation_on_token(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some("links_token_key"))
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    token: String,
    redirect_link: String,
    expiration_minutes: Option<i64>,
    max_unique_clicks: Option<i64>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            token: row.token,
            redirect_link: row.redirect_link,
            expiration_minutes: row.expiration_minutes,
            max_unique_clicks: row.max_unique_clicks,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

const LINK_COLUMNS: &str =
    "id, token, redirect_link, expiration_minutes, max_unique_clicks, active, created_at";

/// PostgreSQL repository for link storage.
///
/// Token uniqueness rides on the `links_token_key` unique index, so the
/// check-and-insert is atomic at the database regardless of how many service
/// instances race on the same token.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "INSERT INTO links (token, redirect_link, expiration_minutes, max_unique_clicks) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(&new_link.token)
        .bind(&new_link.redirect_link)
        .bind(new_link.expiration_minutes)
        .bind(new_link.max_unique_clicks)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_token(&e) {
                AppError::conflict("Token already in use", json!({ "token": new_link.token }))
            } else {
                e.into()
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock so the read-modify-write below is serialized with other
        // writers of the same link.
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let mut link: Link = row
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "link_id": id })))?
            .into();

        patch.apply(&mut link);

        sqlx::query(
            "UPDATE links \
             SET token = $2, redirect_link = $3, expiration_minutes = $4, \
                 max_unique_clicks = $5, active = $6 \
             WHERE id = $1",
        )
        .bind(link.id)
        .bind(&link.token)
        .bind(&link.redirect_link)
        .bind(link.expiration_minutes)
        .bind(link.max_unique_clicks)
        .bind(link.active)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation_on_token(&e) {
                AppError::conflict("Token already in use", json!({ "token": link.token }))
            } else {
                e.into()
            }
        })?;

        tx.commit().await?;

        Ok(link)
    }
}
