//! Holds the last fetched snapshot of the certificate sheet.
//!
//! Fetching the sheet is the only slow step of a verification, so the parsed
//! record set is kept for a short freshness window and shared by every worker.
//!
//! The main components are:
//! - `CertificateCache`: A clonable, thread-safe handle to the cached snapshot.
//!   It is owned by the `CertificateSource` built in `main.rs`; tests build a
//!   fresh one each.
//! - `CachedSnapshot`: The snapshot itself (records + time of retrieval). It is
//!   only reachable through the guard returned by `CertificateCache::lock`, so
//!   the read-check-then-write sequence of a refresh is done under one lock.

use common::model::certificate::Certificate;
use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};
use tokio::sync::{Mutex, MutexGuard};

/// Default maximum age of a cached snapshot.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// The cached record set and the moment it was fetched.
#[derive(Debug)]
pub struct CachedSnapshot {
    records: Option<Arc<Vec<Certificate>>>,
    fetched_at: SystemTime,
    freshness_window: Duration,
}

impl CachedSnapshot {
    fn empty(freshness_window: Duration) -> Self {
        Self {
            records: None,
            fetched_at: SystemTime::UNIX_EPOCH,
            freshness_window,
        }
    }

    /// Returns the cached records if their age at `now` is below the window.
    ///
    /// A clock that went backwards makes the snapshot stale.
    pub fn fresh_records(&self, now: SystemTime) -> Option<Arc<Vec<Certificate>>> {
        let records = self.records.as_ref()?;
        let age = now.duration_since(self.fetched_at).ok()?;
        (age < self.freshness_window).then(|| Arc::clone(records))
    }

    /// Replaces the snapshot with freshly fetched records.
    pub fn replace(&mut self, records: Arc<Vec<Certificate>>, fetched_at: SystemTime) {
        self.records = Some(records);
        self.fetched_at = fetched_at;
    }

    /// Drops the records and resets the timestamp to the epoch.
    pub fn clear(&mut self) {
        self.records = None;
        self.fetched_at = SystemTime::UNIX_EPOCH;
    }
}

/// A shareable handle to the single cached snapshot.
#[derive(Debug, Clone)]
pub struct CertificateCache {
    snapshot: Arc<Mutex<CachedSnapshot>>,
}

impl CertificateCache {
    pub fn new(freshness_window: Duration) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(CachedSnapshot::empty(freshness_window))),
        }
    }

    /// Locks the snapshot. Holding the guard across a fetch keeps concurrent
    /// callers from fetching the sheet twice.
    pub async fn lock(&self) -> MutexGuard<'_, CachedSnapshot> {
        self.snapshot.lock().await
    }

    pub async fn clear(&self) {
        self.snapshot.lock().await.clear();
    }
}

impl Default for CertificateCache {
    fn default() -> Self {
        Self::new(DEFAULT_FRESHNESS_WINDOW)
    }
}
