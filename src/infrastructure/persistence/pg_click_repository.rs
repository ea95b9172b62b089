//! PostgreSQL implementation of the click repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    ip: String,
    created_at: DateTime<Utc>,
}

/// PostgreSQL repository for click events and counts.
///
/// Counts query the table directly every time; the recorder's per-link
/// critical section makes the count-then-insert sequence safe without any
/// cached totals.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            "INSERT INTO link_clicks (link_id, ip) \
             VALUES ($1, $2) \
             RETURNING id, link_id, ip, created_at",
        )
        .bind(new_click.link_id)
        .bind(&new_click.ip)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Click {
            id: row.id,
            link_id: row.link_id,
            ip: row.ip,
            created_at: row.created_at,
        })
    }

    async fn count_unique_ips(&self, link_id: i64) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT ip) FROM link_clicks WHERE link_id = $1")
                .bind(link_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn count_total(&self, link_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks WHERE link_id = $1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
