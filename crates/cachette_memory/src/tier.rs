//! The bounded in-memory tier implementation.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use cachette_tier::{CacheEntry, CacheTier, Error};
use parking_lot::Mutex;

use crate::builder::MemoryTierBuilder;

/// A bounded in-memory cache tier.
///
/// Entries are held in a map guarded by a mutex; mutation is serialized, nothing
/// more. When an insert pushes the map past its capacity bound, entries are evicted
/// oldest-write-first (ties broken by insertion order) until the bound holds again.
///
/// Cloning is cheap and clones share the same underlying state.
///
/// # Examples
///
/// ```
/// use cachette_memory::MemoryTier;
/// use cachette_tier::{CacheEntry, CacheTier};
///
/// # futures::executor::block_on(async {
/// let tier = MemoryTier::<String, i32>::new();
///
/// tier.insert(&"key".to_string(), CacheEntry::new(42)).await?;
/// let value = tier.get(&"key".to_string()).await?;
/// assert_eq!(*value.unwrap().value(), 42);
/// # Ok::<(), cachette_tier::Error>(())
/// # });
/// ```
pub struct MemoryTier<K, V> {
    inner: Arc<Mutex<Shared<K, V>>>,
}

struct Shared<K, V> {
    entries: HashMap<K, Slot<V>>,
    max_entries: Option<usize>,
    next_seq: u64,
}

/// An entry plus the insertion sequence number used to break eviction ties.
struct Slot<V> {
    entry: CacheEntry<V>,
    seq: u64,
}

impl<K, V> Clone for MemoryTier<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> fmt::Debug for MemoryTier<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.inner.lock();
        f.debug_struct("MemoryTier")
            .field("entries", &shared.entries.len())
            .field("max_entries", &shared.max_entries)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for MemoryTier<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoryTier<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new unbounded in-memory tier.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new in-memory tier with a maximum entry count.
    ///
    /// Once the bound is exceeded, oldest-write-first eviction brings the tier
    /// back down to `max_entries`.
    #[must_use]
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self::builder().max_entries(max_entries).build()
    }

    /// Creates a new builder for configuring an in-memory tier.
    #[must_use]
    pub fn builder() -> MemoryTierBuilder<K, V> {
        MemoryTierBuilder::new()
    }

    /// Constructs a `MemoryTier` from a builder.
    pub(crate) fn from_builder(builder: &MemoryTierBuilder<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shared {
                entries: HashMap::new(),
                max_entries: builder.max_entries,
                next_seq: 0,
            })),
        }
    }
}

impl<K, V> Shared<K, V>
where
    K: Clone + Hash + Eq,
{
    fn evict_over_capacity(&mut self) {
        let Some(max) = self.max_entries else {
            return;
        };
        while self.entries.len() > max {
            // Oldest write timestamp first; entries that were never stamped sort
            // before stamped ones, and the insertion sequence breaks ties.
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, slot)| (slot.entry.written_at(), slot.seq))
                .map(|(key, _)| key.clone());
            let Some(key) = oldest else {
                break;
            };
            self.entries.remove(&key);
        }
    }
}

impl<K, V> CacheTier<K, V> for MemoryTier<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>, Error> {
        Ok(self.inner.lock().entries.get(key).map(|slot| slot.entry.clone()))
    }

    async fn insert(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
        let mut shared = self.inner.lock();
        let seq = shared.next_seq;
        shared.next_seq += 1;
        shared.entries.insert(key.clone(), Slot { entry, seq });
        shared.evict_over_capacity();
        Ok(())
    }

    async fn invalidate(&self, key: &K) -> Result<(), Error> {
        self.inner.lock().entries.remove(key);
        Ok(())
    }

    async fn invalidate_tags(&self, tags: &[String]) -> Result<u64, Error> {
        let mut shared = self.inner.lock();
        let before = shared.entries.len();
        shared.entries.retain(|_, slot| !slot.entry.has_any_tag(tags));
        Ok((before - shared.entries.len()) as u64)
    }

    async fn clear(&self) -> Result<(), Error> {
        self.inner.lock().entries.clear();
        Ok(())
    }

    fn len(&self) -> Option<u64> {
        Some(self.inner.lock().entries.len() as u64)
    }
}
