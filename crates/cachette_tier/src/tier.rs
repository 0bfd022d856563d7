//! The core trait for cache storage tiers.
//!
//! [`CacheTier`] defines the interface that both storage tiers of the cache
//! implement. The trait covers storage mechanics only; freshness, promotion and
//! write-through policy live in the orchestrating crate.

use crate::{CacheEntry, Error};

/// Trait for cache tier implementations.
///
/// A tier is a passive store of [`CacheEntry`] values. Tiers never filter on
/// freshness: a `get` returns whatever is stored, stale or not, so the
/// orchestrator can implement stale-while-revalidate on top.
///
/// The five core methods are required: `get`, `insert`, `invalidate`,
/// `invalidate_tags`, and `clear`. Only `len` and `is_empty` have default
/// implementations:
/// - `len`: Returns `None` (not all tiers track size)
/// - `is_empty`: Delegates to `len`
pub trait CacheTier<K, V>: Send + Sync {
    /// Gets a stored entry, returning an error if the operation fails.
    fn get(&self, key: &K) -> impl Future<Output = Result<Option<CacheEntry<V>>, Error>> + Send;

    /// Inserts an entry, returning an error if the operation fails.
    fn insert(&self, key: &K, entry: CacheEntry<V>) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes an entry, returning an error if the operation fails.
    ///
    /// Removing an absent key is a no-op, so the operation is idempotent.
    fn invalidate(&self, key: &K) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes every entry whose tag set intersects `tags`.
    ///
    /// Returns the number of entries removed.
    fn invalidate_tags(&self, tags: &[String]) -> impl Future<Output = Result<u64, Error>> + Send;

    /// Clears all entries, returning an error if the operation fails.
    fn clear(&self) -> impl Future<Output = Result<(), Error>> + Send;

    /// Returns the number of entries, if supported.
    ///
    /// Returns `None` for implementations that don't track size.
    fn len(&self) -> Option<u64> {
        None
    }

    /// Returns `true` if the tier contains no entries.
    ///
    /// Returns `None` for implementations that don't track size.
    fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }
}
