//! Click entity representing a single successful redirect.

use chrono::{DateTime, Utc};

/// A recorded redirect for a link.
///
/// Clicks are append-only: they are written exactly once by the click
/// recorder and never updated or deleted. The visitor IP is the best-effort
/// uniqueness key for the unique-click count.
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub ip: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a new click.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub ip: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_carries_link_back_reference() {
        let click = Click {
            id: 7,
            link_id: 42,
            ip: "203.0.113.9".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(click.link_id, 42);
        assert_eq!(click.ip, "203.0.113.9");
    }
}
