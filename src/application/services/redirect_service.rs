//! Click recording and redirect resolution.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::entities::NewClick;
use crate::domain::locks::LinkLocks;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::domain::resolution::{self, Resolution};
use crate::error::AppError;

/// Service resolving tokens to redirect targets while accounting clicks.
///
/// The count-check-insert sequence runs inside the link's critical section:
/// concurrent requests near the click cap would otherwise each observe a
/// stale unique count and all pass, overshooting the cap. The same lock is
/// held by link updates that change `active` or the cap, so the recorder
/// always evaluates fresh state. In a multi-instance deployment this lock
/// would move into the storage layer as a serializable transaction.
pub struct RedirectService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
    locks: Arc<LinkLocks>,
}

impl RedirectService {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        locks: Arc<LinkLocks>,
    ) -> Self {
        Self {
            links,
            clicks,
            locks,
        }
    }

    /// Resolves `token` for `visitor_ip`, recording the click.
    ///
    /// As one unit per link: recount distinct visitor IPs, evaluate
    /// resolvability with that count, then either insert exactly one click
    /// row and return the redirect target, or reject without writing
    /// anything. A rejected redirect never leaves a click behind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown token, and
    /// [`AppError::Inactive`] / [`AppError::ExpiredByTime`] /
    /// [`AppError::ExpiredByClickCap`] for the non-resolvable states.
    pub async fn record_and_check(
        &self,
        token: &str,
        visitor_ip: &str,
    ) -> Result<String, AppError> {
        let link = self
            .links
            .find_by_token(token)
            .await?
            .ok_or_else(|| not_found(token))?;

        let _guard = self.locks.acquire(link.id).await;

        // Re-read under the lock: an update may have deactivated the link or
        // tightened the cap after the lookup above.
        let link = self
            .links
            .find_by_id(link.id)
            .await?
            .ok_or_else(|| not_found(token))?;

        let unique_clicks = self.clicks.count_unique_ips(link.id).await?;

        match resolution::evaluate(&link, unique_clicks, Utc::now()) {
            Resolution::Resolvable => {}
            Resolution::Inactive => {
                return Err(AppError::inactive(
                    "Link is deactivated",
                    json!({ "token": link.token }),
                ));
            }
            Resolution::ExpiredByTime => {
                return Err(AppError::expired_by_time(
                    "Link has expired",
                    json!({ "token": link.token, "expired_at": link.expires_at() }),
                ));
            }
            Resolution::ExpiredByClickCap => {
                return Err(AppError::expired_by_click_cap(
                    "Link reached its unique click limit",
                    json!({
                        "token": link.token,
                        "max_uniques_clicks": link.max_unique_clicks,
                    }),
                ));
            }
        }

        self.clicks
            .insert(NewClick {
                link_id: link.id,
                ip: visitor_ip.to_string(),
            })
            .await?;

        tracing::debug!(
            link_id = link.id,
            token = %link.token,
            ip = %visitor_ip,
            "redirect recorded"
        );

        Ok(link.redirect_link)
    }
}

fn not_found(token: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "token": token }))
}
