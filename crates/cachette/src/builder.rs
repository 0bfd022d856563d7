//! Builder for constructing a cache instance.

use std::time::Duration;

use cachette_durable::{DurableStore, DurableTier};
use cachette_memory::MemoryTier;
use tick::Clock;

use crate::cache::{Cache, CacheInner};
use crate::revalidate::Revalidations;
use crate::telemetry::CacheTelemetry;

/// Memory-tier bound applied when none is configured.
pub(crate) const DEFAULT_MEMORY_CAPACITY: usize = 256;

/// Builder for a [`Cache`].
///
/// Created by [`Cache::builder`]. The clock is mandatory — it drives all
/// freshness decisions — while the durable tier is optional: without one the
/// cache operates memory-only, which is also the behavior when a configured
/// store turns out to be unavailable at runtime.
///
/// # Examples
///
/// ```
/// use cachette::{Cache, FsStore};
/// use std::time::Duration;
/// use tick::Clock;
///
/// let dir = tempfile::tempdir().unwrap();
/// let clock = Clock::new_frozen();
/// let cache = Cache::builder(clock)
///     .name("records")
///     .memory_capacity(500)
///     .durable(FsStore::new(dir.path()), "records-v1")
///     .default_ttl(Duration::from_secs(300))
///     .build();
/// ```
#[derive(Debug)]
pub struct CacheBuilder {
    name: Option<String>,
    clock: Clock,
    memory_capacity: Option<usize>,
    durable: Option<DurableTier>,
    default_ttl: Option<Duration>,
}

impl CacheBuilder {
    pub(crate) fn new(clock: Clock) -> Self {
        Self {
            name: None,
            clock,
            memory_capacity: Some(DEFAULT_MEMORY_CAPACITY),
            durable: None,
            default_ttl: None,
        }
    }

    /// Sets the name used to identify this cache in log output.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the maximum number of entries held by the memory tier.
    ///
    /// Past the bound, entries with the oldest write timestamp are evicted;
    /// they remain readable from the durable tier.
    #[must_use]
    pub fn memory_capacity(mut self, max_entries: usize) -> Self {
        self.memory_capacity = Some(max_entries);
        self
    }

    /// Removes the memory-tier bound entirely.
    #[must_use]
    pub fn unbounded_memory(mut self) -> Self {
        self.memory_capacity = None;
        self
    }

    /// Attaches a durable store, scoping this cache's keys under `namespace`.
    ///
    /// Two caches sharing one store under different namespaces never observe
    /// each other's entries.
    #[must_use]
    pub fn durable(mut self, store: impl DurableStore + 'static, namespace: impl Into<String>) -> Self {
        self.durable = Some(DurableTier::new(store, namespace));
        self
    }

    /// Sets the TTL applied to entries written without a per-call TTL.
    ///
    /// Per-call TTLs in [`CacheOptions`](crate::CacheOptions) take precedence
    /// over this default.
    #[must_use]
    pub fn default_ttl(mut self, ttl: impl Into<Duration>) -> Self {
        self.default_ttl = Some(ttl.into());
        self
    }

    /// Builds the cache.
    #[must_use]
    pub fn build(self) -> Cache {
        let mut memory = MemoryTier::builder();
        if let Some(capacity) = self.memory_capacity {
            memory = memory.max_entries(capacity);
        }

        Cache::new(CacheInner {
            name: self.name.unwrap_or_else(|| "cachette".to_string()),
            memory: memory.build(),
            durable: self.durable,
            clock: self.clock,
            default_ttl: self.default_ttl,
            revalidations: Revalidations::new(),
            telemetry: CacheTelemetry::default(),
        })
    }
}
