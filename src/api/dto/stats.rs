//! DTO for the statistics endpoint.

use serde::Serialize;

use crate::application::services::LinkStats;

/// Response body for `GET /statistics/{link_id}`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Distinct visitor IPs.
    pub unique_clicks: i64,
    /// Every recorded click, same-IP repeats included.
    pub total_clicks: i64,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            unique_clicks: stats.unique_clicks,
            total_clicks: stats.total_clicks,
        }
    }
}
