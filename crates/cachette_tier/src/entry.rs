use std::{
    ops::Deref,
    time::{Duration, SystemTime},
};

/// A cached value with associated metadata.
///
/// `CacheEntry` wraps a value with the timestamp of its last write, an optional
/// per-entry TTL, and the set of tags it was written with. The orchestrating cache
/// uses this metadata for freshness checks, eviction ordering and tag invalidation;
/// the tiers themselves only store it.
///
/// # Examples
///
/// ```
/// use cachette_tier::CacheEntry;
/// use std::time::Duration;
///
/// // Simple entry with just a value
/// let entry = CacheEntry::new(42);
/// assert_eq!(*entry.value(), 42);
///
/// // Entry with a per-entry TTL
/// let entry = CacheEntry::with_ttl("data".to_string(), Duration::from_secs(60));
/// assert_eq!(entry.ttl(), Some(Duration::from_secs(60)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry<V> {
    value: V,
    written_at: Option<SystemTime>,
    /// Per-entry TTL override. If set, takes precedence over the cache-level default TTL.
    ttl: Option<Duration>,
    tags: Vec<String>,
}

impl<V> CacheEntry<V> {
    /// Creates a new cache entry with the given value.
    ///
    /// The write timestamp is stamped by the cache when the entry is inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use cachette_tier::CacheEntry;
    ///
    /// let entry = CacheEntry::new(42);
    /// assert_eq!(*entry.value(), 42);
    /// assert!(entry.written_at().is_none());
    /// ```
    pub fn new(value: V) -> Self {
        Self {
            value,
            written_at: None,
            ttl: None,
            tags: Vec::new(),
        }
    }

    /// Creates a new cache entry with a per-entry TTL.
    ///
    /// The per-entry TTL takes precedence over any cache-level default TTL.
    pub fn with_ttl(value: V, ttl: Duration) -> Self {
        Self {
            value,
            written_at: None,
            ttl: Some(ttl),
            tags: Vec::new(),
        }
    }

    /// Creates a cache entry from all of its parts.
    ///
    /// This is typically used when recreating entries from persistent storage,
    /// where the original write timestamp, TTL and tags must be preserved.
    pub fn from_parts(value: V, written_at: Option<SystemTime>, ttl: Option<Duration>, tags: Vec<String>) -> Self {
        Self {
            value,
            written_at,
            ttl,
            tags,
        }
    }

    /// Returns the timestamp of this entry's last write.
    ///
    /// Returns `None` if the entry hasn't been inserted yet.
    #[must_use]
    pub fn written_at(&self) -> Option<SystemTime> {
        self.written_at
    }

    /// Sets the write timestamp.
    ///
    /// This is called by the cache when inserting.
    pub fn set_written_at(&mut self, written_at: SystemTime) {
        self.written_at = Some(written_at);
    }

    /// Returns the per-entry TTL, if set.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Sets the per-entry TTL.
    ///
    /// This overrides any cache-level default TTL for this specific entry.
    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = Some(ttl);
    }

    /// Returns the tags this entry was written with.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Replaces the tags on this entry.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    /// Returns `true` if any of the given tags is attached to this entry.
    ///
    /// An empty `tags` slice matches nothing.
    #[must_use]
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }

    /// Returns `true` if this entry is stale at `now`.
    ///
    /// The effective TTL is the per-entry TTL, falling back to `fallback_ttl`.
    /// An entry with no effective TTL never goes stale. An entry that has an
    /// effective TTL but no write timestamp is treated as stale, as is an entry
    /// whose timestamp lies in the future (the system clock went backwards).
    ///
    /// # Examples
    ///
    /// ```
    /// use cachette_tier::CacheEntry;
    /// use std::time::{Duration, SystemTime};
    ///
    /// let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
    /// let mut entry = CacheEntry::with_ttl(42, Duration::from_secs(10));
    /// entry.set_written_at(t0);
    ///
    /// assert!(!entry.is_expired_at(t0 + Duration::from_secs(9), None));
    /// assert!(entry.is_expired_at(t0 + Duration::from_secs(10), None));
    /// ```
    #[must_use]
    pub fn is_expired_at(&self, now: SystemTime, fallback_ttl: Option<Duration>) -> bool {
        let Some(ttl) = self.ttl.or(fallback_ttl) else {
            return false;
        };
        let Some(written_at) = self.written_at else {
            return true;
        };
        match now.duration_since(written_at) {
            Ok(elapsed) => elapsed >= ttl,
            Err(_) => true,
        }
    }

    /// Consumes the entry and returns the inner value.
    #[must_use]
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns a reference to the cached value.
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V> Deref for CacheEntry<V> {
    type Target = V;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<V> From<V> for CacheEntry<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}
