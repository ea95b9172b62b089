//! Pure resolvability decision for a link.
//!
//! The evaluator owns the single rule deciding whether a redirect may
//! proceed. It takes the current unique-click count as an input instead of
//! reading storage itself, so the click recorder can call it inside its
//! per-link critical section with a count it just computed.

use chrono::{DateTime, Utc};

use crate::domain::entities::Link;

/// Outcome of evaluating a link for resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Resolvable,
    Inactive,
    ExpiredByTime,
    ExpiredByClickCap,
}

/// Decides whether `link` resolves at `now` given `unique_clicks` distinct
/// visitors so far.
///
/// A link is resolvable iff it is active, its time window (if any) has not
/// elapsed, and its unique-click cap (if any) is not yet reached. The checks
/// run in that order, so an inactive link reports `Inactive` even when it is
/// also expired.
pub fn evaluate(link: &Link, unique_clicks: i64, now: DateTime<Utc>) -> Resolution {
    if !link.active {
        return Resolution::Inactive;
    }

    if link.is_expired_at(now) {
        return Resolution::ExpiredByTime;
    }

    if let Some(cap) = link.max_unique_clicks {
        if unique_clicks >= cap {
            return Resolution::ExpiredByClickCap;
        }
    }

    Resolution::Resolvable
}
