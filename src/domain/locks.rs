//! Per-link lock table.
//!
//! Click accounting and link updates that touch click-relevant state
//! (`active`, the click cap) must be linearized per link. The table hands out
//! one async mutex per link id; distinct links never contend.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Table of per-link async mutexes, keyed by link id.
///
/// Locks are created lazily on first use. Entries are small and links are
/// long-lived, so the table is never pruned.
#[derive(Debug, Default)]
pub struct LinkLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl LinkLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the critical section for `link_id`.
    ///
    /// The map guard is released before awaiting the mutex, so a held lock
    /// never blocks lookups of other link ids.
    pub async fn acquire(&self, link_id: i64) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(link_id).or_default().value().clone();
        lock.lock_owned().await
    }
}
