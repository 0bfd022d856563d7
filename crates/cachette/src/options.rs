//! Per-call cache options.

use std::time::Duration;

/// Options applied to a single cache read or write.
///
/// Options are cheap to build and clone; construct them fluently at the call
/// site:
///
/// ```
/// use cachette::CacheOptions;
/// use std::time::Duration;
///
/// let options = CacheOptions::new()
///     .ttl(Duration::from_secs(300))
///     .tags(["records", "user:7"])
///     .stale_while_revalidate(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheOptions {
    pub(crate) ttl: Option<Duration>,
    pub(crate) tags: Vec<String>,
    pub(crate) stale_while_revalidate: bool,
}

impl CacheOptions {
    /// Creates options with no TTL, no tags, and stale-while-revalidate off.
    ///
    /// Without a per-call TTL, the cache-level default TTL applies; without
    /// that either, the entry never goes stale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the TTL for the entry written by this call.
    ///
    /// A per-call TTL takes precedence over the cache-level default TTL.
    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Sets the tags attached to the entry written by this call.
    ///
    /// Tags are flat labels used only by bulk invalidation.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables stale-while-revalidate for this read.
    ///
    /// When enabled, a stale entry is returned immediately while a detached
    /// refresh re-runs the fetch function in the background. When disabled
    /// (the default), a stale entry behaves like a miss.
    #[must_use]
    pub fn stale_while_revalidate(mut self, enabled: bool) -> Self {
        self.stale_while_revalidate = enabled;
        self
    }
}
