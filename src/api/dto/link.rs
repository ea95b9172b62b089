//! DTOs for link creation and representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request body for `POST /create`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Desired token. Omitted behavior depends on the configured token
    /// policy: generated server-side or rejected.
    pub token: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub redirect_link: String,

    /// Whole minutes until the link stops resolving. `0` expires it
    /// immediately.
    #[validate(range(min = 0, message = "Expiration must be zero or more minutes"))]
    pub expiration_time: i64,

    /// Cap on distinct visitors; absent means unlimited.
    #[validate(range(min = 1, message = "Unique click limit must be positive"))]
    pub max_uniques_clicks: Option<i64>,
}

/// JSON representation of a link.
///
/// `expiration_time` is reported in the same unit it was supplied in (whole
/// minutes), so integer inputs round-trip exactly.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub token: String,
    pub redirect_link: String,
    pub expiration_time: Option<i64>,
    pub max_uniques_clicks: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            token: link.token,
            redirect_link: link.redirect_link,
            expiration_time: link.expiration_minutes,
            max_uniques_clicks: link.max_unique_clicks,
            active: link.active,
            created_at: link.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_validates_url() {
        let request = CreateLinkRequest {
            token: None,
            redirect_link: "not a url".to_string(),
            expiration_time: 45,
            max_uniques_clicks: None,
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn create_request_rejects_negative_expiration() {
        let request = CreateLinkRequest {
            token: None,
            redirect_link: "https://example.com".to_string(),
            expiration_time: -1,
            max_uniques_clicks: None,
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn create_request_rejects_zero_click_cap() {
        let request = CreateLinkRequest {
            token: None,
            redirect_link: "https://example.com".to_string(),
            expiration_time: 45,
            max_uniques_clicks: Some(0),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn minutes_round_trip_through_response() {
        let link = Link {
            id: 1,
            token: "promo".to_string(),
            redirect_link: "https://example.com".to_string(),
            expiration_minutes: Some(45),
            max_unique_clicks: Some(3),
            active: true,
            created_at: Utc::now(),
        };

        let response = LinkResponse::from(link);
        assert_eq!(response.expiration_time, Some(45));
        assert_eq!(response.max_uniques_clicks, Some(3));
    }
}
