//! Click statistics service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Aggregated click counts for a single link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    /// Distinct visitor IPs.
    pub unique_clicks: i64,
    /// Every recorded click, same-IP repeats included.
    pub total_clicks: i64,
}

/// Read-only aggregation over a link's click records.
pub struct StatsService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl StatsService {
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    /// Returns unique and total click counts for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has `link_id`.
    pub async fn stats(&self, link_id: i64) -> Result<LinkStats, AppError> {
        if self.links.find_by_id(link_id).await?.is_none() {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": link_id }),
            ));
        }

        let unique_clicks = self.clicks.count_unique_ips(link_id).await?;
        let total_clicks = self.clicks.count_total(link_id).await?;

        Ok(LinkStats {
            unique_clicks,
            total_clicks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::{MockClickRepository, MockLinkRepository};
    use chrono::Utc;

    fn link() -> Link {
        Link {
            id: 1,
            token: "promo".to_string(),
            redirect_link: "https://example.com".to_string(),
            expiration_minutes: None,
            max_unique_clicks: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn reports_unique_and_total_counts() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(link())));

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_count_unique_ips()
            .times(1)
            .returning(|_| Ok(2));
        clicks.expect_count_total().times(1).returning(|_| Ok(5));

        let stats = StatsService::new(Arc::new(links), Arc::new(clicks))
            .stats(1)
            .await
            .unwrap();

        assert_eq!(
            stats,
            LinkStats {
                unique_clicks: 2,
                total_clicks: 5
            }
        );
    }

    #[tokio::test]
    async fn unknown_link_is_not_found() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_id().times(1).returning(|_| Ok(None));

        let mut clicks = MockClickRepository::new();
        clicks.expect_count_unique_ips().times(0);
        clicks.expect_count_total().times(0);

        let err = StatsService::new(Arc::new(links), Arc::new(clicks))
            .stats(404)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn inactive_links_still_report_stats() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_id().times(1).returning(|_| {
            let mut l = link();
            l.active = false;
            Ok(Some(l))
        });

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_count_unique_ips()
            .times(1)
            .returning(|_| Ok(1));
        clicks.expect_count_total().times(1).returning(|_| Ok(3));

        let stats = StatsService::new(Arc::new(links), Arc::new(clicks))
            .stats(1)
            .await
            .unwrap();

        assert_eq!(stats.total_clicks, 3);
    }
}
