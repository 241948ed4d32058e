// Core data structures for the gleaner crawler

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// A single extracted article ready for persistence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedArticle {
    pub url: String,
    pub title: String,
    pub body: String,
}

impl ExtractedArticle {
    /// Body length in characters, the unit all extraction thresholds use
    #[must_use]
    pub fn body_chars(&self) -> usize {
        self.body.chars().count()
    }
}

/// Set of URLs already claimed for processing
///
/// Shared across download workers; the only mutation is an atomic
/// insert-and-report so each URL is attempted at most once.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a URL, returning `true` if it was not previously present
    pub fn insert(&self, url: &str) -> bool {
        self.lock().insert(url.to_string())
    }

    /// Check whether a URL was already claimed
    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Number of URLs claimed so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Counters shared across download workers
#[derive(Debug, Default)]
pub struct DownloadStats {
    saved: AtomicU64,
    failed: AtomicU64,
    skipped: AtomicU64,
}

impl DownloadStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a saved article and return the new total
    pub fn record_saved(&self) -> u64 {
        self.saved.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record a failed URL
    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a deliberately skipped URL
    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    /// Get a consistent snapshot of all counters
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            saved: self.saved.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            skipped: self.skipped.load(Ordering::SeqCst),
        }
    }
}

/// Point-in-time view of the download counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub saved: u64,
    pub failed: u64,
    pub skipped: u64,
}

/// Summary of one discovery run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Domains examined (relevant or not)
    pub domains_checked: usize,

    /// Domains that passed the relevance filter
    pub domains_accepted: usize,

    /// Total queued article URLs after the run
    pub links_found: usize,

    /// Whether the run was cut short by Ctrl-C
    pub interrupted: bool,
}
