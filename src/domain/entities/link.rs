//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Duration, Utc};

/// A short link with its expiration and click-cap settings.
///
/// The expiration window is stored as whole minutes relative to `created_at`
/// so integer-minute inputs round-trip exactly through the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub token: String,
    pub redirect_link: String,
    /// Minutes after `created_at` at which the link stops resolving.
    /// `None` means the link never expires by time; `Some(0)` expires it
    /// immediately.
    pub expiration_minutes: Option<i64>,
    /// Cap on distinct visitor IPs before the link stops resolving.
    /// `None` means unlimited.
    pub max_unique_clicks: Option<i64>,
    /// Inactive links never resolve, regardless of expiration state.
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Absolute deadline after which the link no longer resolves.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiration_minutes
            .map(|minutes| self.created_at + Duration::minutes(minutes))
    }

    /// Returns true if the link's time window has elapsed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|deadline| now >= deadline)
    }
}

/// Input data for creating a new link.
///
/// The token is always resolved (supplied or generated) before the storage
/// insert; `active` starts as `true`.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub token: String,
    pub redirect_link: String,
    pub expiration_minutes: Option<i64>,
    pub max_unique_clicks: Option<i64>,
}

/// Partial update for an existing link.
///
/// Outer `None` leaves the stored value unchanged. For the clearable fields
/// the inner option distinguishes "set to a value" from "clear":
/// `expiration_minutes: Some(None)` removes the time limit,
/// `max_unique_clicks: Some(None)` removes the click cap.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub redirect_link: Option<String>,
    pub token: Option<String>,
    pub expiration_minutes: Option<Option<i64>>,
    pub max_unique_clicks: Option<Option<i64>>,
    pub active: Option<bool>,
}

impl LinkPatch {
    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        self.redirect_link.is_none()
            && self.token.is_none()
            && self.expiration_minutes.is_none()
            && self.max_unique_clicks.is_none()
            && self.active.is_none()
    }

    /// Applies every present field onto `link`, replacing prior values.
    ///
    /// Shared by the storage backends so patch semantics cannot drift
    /// between them.
    pub fn apply(&self, link: &mut Link) {
        if let Some(redirect_link) = &self.redirect_link {
            link.redirect_link = redirect_link.clone();
        }
        if let Some(token) = &self.token {
            link.token = token.clone();
        }
        if let Some(expiration_minutes) = self.expiration_minutes {
            link.expiration_minutes = expiration_minutes;
        }
        if let Some(max_unique_clicks) = self.max_unique_clicks {
            link.max_unique_clicks = max_unique_clicks;
        }
        if let Some(active) = self.active {
            link.active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(expiration_minutes: Option<i64>) -> Link {
        Link {
            id: 1,
            token: "promo".to_string(),
            redirect_link: "https://example.com".to_string(),
            expiration_minutes,
            max_unique_clicks: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn expires_at_is_created_at_plus_minutes() {
        let l = link(Some(45));
        assert_eq!(l.expires_at(), Some(l.created_at + Duration::minutes(45)));
    }

    #[test]
    fn no_expiration_never_expires() {
        let l = link(None);
        assert_eq!(l.expires_at(), None);
        assert!(!l.is_expired_at(Utc::now() + Duration::days(365)));
    }

    #[test]
    fn zero_minutes_expires_immediately() {
        let l = link(Some(0));
        assert!(l.is_expired_at(l.created_at));
    }

    #[test]
    fn deadline_is_exclusive_of_window() {
        let l = link(Some(10));
        assert!(!l.is_expired_at(l.created_at + Duration::minutes(9)));
        assert!(l.is_expired_at(l.created_at + Duration::minutes(10)));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut l = link(Some(45));
        let before = l.clone();

        let patch = LinkPatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut l);

        assert_eq!(l, before);
    }

    #[test]
    fn patch_replaces_only_present_fields() {
        let mut l = link(Some(45));

        let patch = LinkPatch {
            redirect_link: Some("https://other.example".to_string()),
            active: Some(false),
            ..Default::default()
        };
        patch.apply(&mut l);

        assert_eq!(l.redirect_link, "https://other.example");
        assert!(!l.active);
        assert_eq!(l.expiration_minutes, Some(45));
        assert_eq!(l.token, "promo");
    }

    #[test]
    fn patch_inner_none_clears_limits() {
        let mut l = link(Some(45));
        l.max_unique_clicks = Some(3);

        let patch = LinkPatch {
            expiration_minutes: Some(None),
            max_unique_clicks: Some(None),
            ..Default::default()
        };
        patch.apply(&mut l);

        assert_eq!(l.expiration_minutes, None);
        assert_eq!(l.max_unique_clicks, None);
    }

    #[test]
    fn patch_can_set_falsy_values() {
        let mut l = link(None);

        let patch = LinkPatch {
            expiration_minutes: Some(Some(0)),
            active: Some(false),
            ..Default::default()
        };
        patch.apply(&mut l);

        assert_eq!(l.expiration_minutes, Some(0));
        assert!(!l.active);
    }
}
