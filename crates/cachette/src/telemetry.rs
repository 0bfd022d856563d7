//! Cache activity recording.
//!
//! Every cache operation records what happened — hit, miss, expiry, stale
//! serve — as a structured `tracing` event plus a process-local counter.
//! The counters are surfaced to callers through [`CacheStats`].

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// What a cache operation observed or did.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CacheActivity {
    /// A fresh entry was returned.
    Hit,
    /// A stale entry was returned while a background refresh was triggered.
    StaleServed,
    /// Nothing usable was cached; the fetch function ran synchronously.
    Miss,
    /// A cached entry was found but had outlived its TTL.
    Expired,
    /// An entry was written to the tiers.
    Inserted,
    /// An entry was explicitly removed.
    Invalidated,
    /// A background refresh completed and rewrote the entry.
    Revalidated,
}

impl CacheActivity {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::StaleServed => "stale_served",
            Self::Miss => "miss",
            Self::Expired => "expired",
            Self::Inserted => "inserted",
            Self::Invalidated => "invalidated",
            Self::Revalidated => "revalidated",
        }
    }
}

/// Process-local activity counters.
#[derive(Debug, Default)]
pub(crate) struct CacheTelemetry {
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
    revalidations: AtomicU64,
}

impl CacheTelemetry {
    pub(crate) fn record(&self, cache: &str, key: &str, activity: CacheActivity) {
        match activity {
            CacheActivity::Hit | CacheActivity::StaleServed => {
                self.hits.fetch_add(1, Ordering::Relaxed);
            }
            CacheActivity::Miss => {
                self.misses.fetch_add(1, Ordering::Relaxed);
            }
            CacheActivity::Expired => {
                self.expirations.fetch_add(1, Ordering::Relaxed);
            }
            CacheActivity::Revalidated => {
                self.revalidations.fetch_add(1, Ordering::Relaxed);
            }
            CacheActivity::Inserted | CacheActivity::Invalidated => {}
        }
        debug!(cache, key, activity = activity.as_str(), "cache activity");
    }

    pub(crate) fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub(crate) fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub(crate) fn expirations(&self) -> u64 {
        self.expirations.load(Ordering::Relaxed)
    }

    pub(crate) fn revalidations(&self) -> u64 {
        self.revalidations.load(Ordering::Relaxed)
    }
}

/// A point-in-time snapshot of cache state and activity.
///
/// `memory_entries` and `durable_entries` are current tier sizes; the
/// remaining fields are counters accumulated since the cache was built.
/// Served stale values count as hits; every synchronous fetch counts as a
/// miss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries currently held by the memory tier.
    pub memory_entries: u64,
    /// Number of entries currently persisted in this cache's namespace.
    pub durable_entries: u64,
    /// Reads answered from a cached entry, fresh or stale.
    pub hits: u64,
    /// Reads that ran the fetch function synchronously.
    pub misses: u64,
    /// Reads that found an entry past its TTL.
    pub expirations: u64,
    /// Background refreshes that completed and rewrote their entry.
    pub revalidations: u64,
}
