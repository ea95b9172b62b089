//! In-memory storage backend.
//!
//! Selected when no `DATABASE_URL` is configured, and used by the test
//! suites. All state sits behind one `RwLock`, so the token
//! check-and-insert in `create`/`update` is atomic under a single write
//! guard. Guards are never held across an await point.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::entities::{Click, Link, LinkPatch, NewClick, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Inner {
    links: HashMap<i64, Link>,
    token_index: HashMap<String, i64>,
    clicks: HashMap<i64, Vec<Click>>,
    next_link_id: i64,
    next_click_id: i64,
}

/// In-memory implementation of both storage traits.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: RwLock<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::internal("Storage lock poisoned", json!({})))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::internal("Storage lock poisoned", json!({})))
    }
}

#[async_trait]
impl LinkRepository for MemoryBackend {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.write()?;

        if inner.token_index.contains_key(&new_link.token) {
            return Err(AppError::conflict(
                "Token already in use",
                json!({ "token": new_link.token }),
            ));
        }

        inner.next_link_id += 1;
        let id = inner.next_link_id;

        let link = Link {
            id,
            token: new_link.token.clone(),
            redirect_link: new_link.redirect_link,
            expiration_minutes: new_link.expiration_minutes,
            max_unique_clicks: new_link.max_unique_clicks,
            active: true,
            created_at: Utc::now(),
        };

        inner.token_index.insert(new_link.token, id);
        inner.links.insert(id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.read()?.links.get(&id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, AppError> {
        let inner = self.read()?;
        Ok(inner
            .token_index
            .get(token)
            .and_then(|id| inner.links.get(id))
            .cloned())
    }

    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let mut inner = self.write()?;

        let Some(current) = inner.links.get(&id) else {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": id }),
            ));
        };

        if let Some(new_token) = &patch.token {
            if let Some(&owner) = inner.token_index.get(new_token) {
                if owner != id {
                    return Err(AppError::conflict(
                        "Token already in use",
                        json!({ "token": new_token }),
                    ));
                }
            }
        }

        let old_token = current.token.clone();
        let mut link = current.clone();
        patch.apply(&mut link);

        if link.token != old_token {
            inner.token_index.remove(&old_token);
            inner.token_index.insert(link.token.clone(), id);
        }
        inner.links.insert(id, link.clone());

        Ok(link)
    }
}

#[async_trait]
impl ClickRepository for MemoryBackend {
    async fn insert(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut inner = self.write()?;

        inner.next_click_id += 1;
        let click = Click {
            id: inner.next_click_id,
            link_id: new_click.link_id,
            ip: new_click.ip,
            created_at: Utc::now(),
        };

        inner
            .clicks
            .entry(new_click.link_id)
            .or_default()
            .push(click.clone());

        Ok(click)
    }

    async fn count_unique_ips(&self, link_id: i64) -> Result<i64, AppError> {
        let inner = self.read()?;
        let uniques: HashSet<&str> = inner
            .clicks
            .get(&link_id)
            .map(|clicks| clicks.iter().map(|c| c.ip.as_str()).collect())
            .unwrap_or_default();

        Ok(uniques.len() as i64)
    }

    async fn count_total(&self, link_id: i64) -> Result<i64, AppError> {
        let inner = self.read()?;
        Ok(inner
            .clicks
            .get(&link_id)
            .map(|clicks| clicks.len() as i64)
            .unwrap_or(0))
    }
}
