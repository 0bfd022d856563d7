//! The cache orchestrator.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use cachette_durable::DurableTier;
use cachette_memory::MemoryTier;
use cachette_tier::{CacheEntry, CacheTier};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tick::Clock;
use tracing::{debug, warn};

use crate::builder::CacheBuilder;
use crate::error::Error;
use crate::options::CacheOptions;
use crate::revalidate::Revalidations;
use crate::telemetry::{CacheActivity, CacheStats, CacheTelemetry};

/// One request of a [`get_batch`](Cache::get_batch) call.
pub struct BatchRequest<F> {
    /// The cache key to read.
    pub key: String,
    /// The fetch function for this key.
    pub fetch: F,
    /// The options applied to this read.
    pub options: CacheOptions,
}

impl<F> fmt::Debug for BatchRequest<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchRequest")
            .field("key", &self.key)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A tiered, process-local cache.
///
/// `Cache` coordinates two storage tiers — a bounded in-memory map and a
/// durable key/value store — under one read-through API. Reads check memory
/// first, fall back to the durable tier (promoting fresh finds into memory),
/// and only then run the caller-supplied fetch function. Entries carry a TTL
/// and tags; stale entries can be served immediately while a detached
/// background refresh replaces them ([`CacheOptions::stale_while_revalidate`]).
///
/// Construct one instance at process start via [`Cache::builder`] and hand out
/// clones: cloning is cheap and all clones share state. There is no global
/// cache; the instance's lifecycle belongs to the hosting application, and no
/// teardown is needed beyond dropping the handles.
///
/// The cache is strictly best-effort. Storage failures, corrupt durable
/// entries and background fetch failures are contained and logged; the only
/// error a caller can observe is its own fetch function failing on the
/// synchronous miss path.
///
/// Concurrent calls are tolerated but not coalesced: two overlapping misses on
/// one key may each invoke their fetch function, and both converge to the same
/// cached state.
///
/// # Examples
///
/// ```
/// use cachette::{Cache, CacheOptions};
/// use std::time::Duration;
/// use tick::Clock;
///
/// # futures::executor::block_on(async {
/// let clock = Clock::new_frozen();
/// let cache = Cache::builder(clock).name("records").build();
///
/// let options = CacheOptions::new().ttl(Duration::from_secs(300));
/// let value: i32 = cache
///     .get("answer", || async { Ok::<_, std::io::Error>(42) }, options)
///     .await?;
/// assert_eq!(value, 42);
/// # Ok::<(), cachette::Error>(())
/// # });
/// ```
#[derive(Clone)]
pub struct Cache {
    inner: Arc<CacheInner>,
}

pub(crate) struct CacheInner {
    pub(crate) name: String,
    pub(crate) memory: MemoryTier<String, Value>,
    pub(crate) durable: Option<DurableTier>,
    pub(crate) clock: Clock,
    pub(crate) default_ttl: Option<Duration>,
    pub(crate) revalidations: Revalidations,
    pub(crate) telemetry: CacheTelemetry,
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.inner.name)
            .field("memory", &self.inner.memory)
            .field("durable", &self.inner.durable)
            .finish_non_exhaustive()
    }
}

impl Cache {
    /// Creates a new cache builder.
    ///
    /// The clock drives every freshness decision, which is what lets tests
    /// freeze and advance time deterministically.
    #[must_use]
    pub fn builder(clock: Clock) -> CacheBuilder {
        CacheBuilder::new(clock)
    }

    pub(crate) fn new(inner: CacheInner) -> Self {
        Self { inner: Arc::new(inner) }
    }

    /// Returns the name of this cache, used in log output.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns a reference to the cache's clock.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.inner.clock
    }

    /// Reads a value, running `fetch` if nothing usable is cached.
    ///
    /// The lookup proceeds tier by tier:
    ///
    /// 1. A fresh memory entry is returned directly — the fast path does no
    ///    durable I/O.
    /// 2. A fresh durable entry is promoted into the memory tier and returned.
    /// 3. If only a stale entry exists and
    ///    [`stale_while_revalidate`](CacheOptions::stale_while_revalidate) is
    ///    enabled, the stale value is returned immediately and a detached task
    ///    re-runs `fetch`, rewriting both tiers on success. A failed refresh
    ///    is logged and the entry stays stale, so the next read tries again.
    /// 4. Otherwise `fetch` runs synchronously; its value is written to both
    ///    tiers and returned.
    ///
    /// The fetch function must tolerate being invoked more than once:
    /// overlapping misses on the same key are not coalesced.
    ///
    /// # Errors
    ///
    /// Returns an error only from the synchronous path (4): either `fetch`
    /// failed — its error is the [`source`](std::error::Error::source) — or
    /// the fetched value could not be (de)serialized.
    pub async fn get<T, F, Fut, E>(&self, key: &str, fetch: F, options: CacheOptions) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let owned_key = key.to_string();
        let now = self.inner.clock.system_time();
        let mut stale: Option<CacheEntry<Value>> = None;

        match self.inner.memory.get(&owned_key).await {
            Ok(Some(entry)) => {
                if entry.is_expired_at(now, self.inner.default_ttl) {
                    stale = Some(entry);
                } else if let Some(value) = decode(key, entry.value()) {
                    self.inner.telemetry.record(&self.inner.name, key, CacheActivity::Hit);
                    return Ok(value);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "memory read failed; treating as miss"),
        }

        if let Some(durable) = &self.inner.durable {
            match durable.get(&owned_key).await {
                Ok(Some(entry)) => {
                    if entry.is_expired_at(now, self.inner.default_ttl) {
                        stale = Some(entry);
                    } else {
                        if let Err(e) = self.inner.memory.insert(&owned_key, entry.clone()).await {
                            warn!(key, error = %e, "promotion into memory failed");
                        }
                        if let Some(value) = decode(key, entry.value()) {
                            self.inner.telemetry.record(&self.inner.name, key, CacheActivity::Hit);
                            return Ok(value);
                        }
                        stale = None;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(key, error = %e, "durable read failed; treating as miss"),
            }
        }

        if stale.is_some() {
            self.inner.telemetry.record(&self.inner.name, key, CacheActivity::Expired);
        }

        if options.stale_while_revalidate
            && let Some(entry) = &stale
            && let Some(value) = decode(key, entry.value())
        {
            self.spawn_revalidation(&owned_key, fetch, &options);
            self.inner.telemetry.record(&self.inner.name, key, CacheActivity::StaleServed);
            return Ok(value);
        }

        self.inner.telemetry.record(&self.inner.name, key, CacheActivity::Miss);
        let value = fetch().await.map_err(Error::caused_by)?;
        let json = serde_json::to_value(&value).map_err(Error::caused_by)?;
        self.inner.write_entry(&owned_key, json, &options).await;
        Ok(value)
    }

    /// Writes a value to both tiers, stamping the write time from the clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized. Storage failures
    /// are contained, as everywhere else.
    pub async fn set<T>(&self, key: &str, value: &T, options: CacheOptions) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_value(value).map_err(Error::caused_by)?;
        self.inner.write_entry(key, json, &options).await;
        Ok(())
    }

    /// Removes the entry for `key` from both tiers.
    ///
    /// Removing an absent key is a no-op, so repeated calls are harmless.
    pub async fn invalidate(&self, key: &str) {
        let owned_key = key.to_string();
        if let Err(e) = self.inner.memory.invalidate(&owned_key).await {
            warn!(key, error = %e, "memory invalidation failed");
        }
        if let Some(durable) = &self.inner.durable
            && let Err(e) = durable.invalidate(&owned_key).await
        {
            warn!(key, error = %e, "durable invalidation failed");
        }
        self.inner.telemetry.record(&self.inner.name, key, CacheActivity::Invalidated);
    }

    /// Removes every entry whose tag set intersects `tags`, in both tiers.
    ///
    /// The durable tier has no index on tags, so its side of the sweep
    /// enumerates and decodes every entry in the namespace.
    pub async fn invalidate_by_tags<I, S>(&self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        if tags.is_empty() {
            return;
        }

        let mut removed = 0;
        match self.inner.memory.invalidate_tags(&tags).await {
            Ok(count) => removed += count,
            Err(e) => warn!(error = %e, "memory tag sweep failed"),
        }
        if let Some(durable) = &self.inner.durable {
            match durable.invalidate_tags(&tags).await {
                Ok(count) => removed += count,
                Err(e) => warn!(error = %e, "durable tag sweep failed"),
            }
        }
        debug!(cache = %self.inner.name, ?tags, removed, "tag invalidation swept");
    }

    /// Populates the cache with the result of `fetch`.
    ///
    /// Unlike [`get`](Self::get), a failed fetch is swallowed and logged —
    /// preloading is an optimization, never an obligation.
    pub async fn preload<T, F, Fut, E>(&self, key: &str, fetch: F, options: CacheOptions)
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        if let Err(e) = self.get(key, fetch, options).await {
            warn!(key, error = %e, "preload fetch failed");
        }
    }

    /// Reads many keys concurrently.
    ///
    /// Every request runs as its own [`get`](Self::get). A request whose fetch
    /// fails is logged and omitted from the result map; one failure never
    /// fails the batch.
    pub async fn get_batch<T, F, Fut, E>(&self, requests: Vec<BatchRequest<F>>) -> HashMap<String, T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let lookups = requests.into_iter().map(|request| {
            let BatchRequest { key, fetch, options } = request;
            async move {
                let result = self.get(&key, fetch, options).await;
                (key, result)
            }
        });

        let mut values = HashMap::new();
        for (key, result) in futures::future::join_all(lookups).await {
            match result {
                Ok(value) => {
                    values.insert(key, value);
                }
                Err(e) => warn!(key = %key, error = %e, "batch fetch failed; omitting key"),
            }
        }
        values
    }

    /// Returns current tier sizes and activity counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            memory_entries: self.inner.memory.len().unwrap_or(0),
            durable_entries: self.inner.durable.as_ref().and_then(|durable| durable.len()).unwrap_or(0),
            hits: self.inner.telemetry.hits(),
            misses: self.inner.telemetry.misses(),
            expirations: self.inner.telemetry.expirations(),
            revalidations: self.inner.telemetry.revalidations(),
        }
    }

    /// Waits for every detached revalidation issued so far to settle.
    ///
    /// Intended for test suites, which would otherwise have to sleep-poll for
    /// background refreshes. Production code never needs to call this; a
    /// refresh that outlives interest in it simply finishes on its own.
    pub async fn await_pending_revalidations(&self) {
        self.inner.revalidations.wait_all().await;
    }

    /// Spawns the detached refresh task for a stale entry.
    ///
    /// If a refresh is already in flight for this key, the fetch function is
    /// dropped unused; the caller has already been served the stale value.
    fn spawn_revalidation<T, F, Fut, E>(&self, key: &str, fetch: F, options: &CacheOptions)
    where
        T: Serialize + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        if !self.inner.revalidations.try_start(key) {
            debug!(key, "revalidation already in flight");
            return;
        }

        let inner = Arc::clone(&self.inner);
        let key = key.to_string();
        let options = options.clone();
        let handle = tokio::spawn(async move {
            match fetch().await {
                Ok(value) => match serde_json::to_value(&value) {
                    Ok(json) => {
                        inner.write_entry(&key, json, &options).await;
                        inner.telemetry.record(&inner.name, &key, CacheActivity::Revalidated);
                    }
                    Err(e) => {
                        warn!(key = %key, error = %e, "revalidated value failed to serialize; stale entry left in place");
                    }
                },
                Err(e) => warn!(key = %key, error = %e, "background revalidation failed; stale entry left in place"),
            }
            inner.revalidations.finish(&key);
        });
        self.inner.revalidations.register(handle);
    }
}

impl CacheInner {
    /// Writes an entry through both tiers, memory first.
    pub(crate) async fn write_entry(&self, key: &str, value: Value, options: &CacheOptions) {
        let mut entry = CacheEntry::new(value);
        if let Some(ttl) = options.ttl {
            entry.set_ttl(ttl);
        }
        entry.set_tags(options.tags.clone());
        entry.set_written_at(self.clock.system_time());

        let owned_key = key.to_string();
        if let Err(e) = self.memory.insert(&owned_key, entry.clone()).await {
            warn!(key, error = %e, "memory write failed");
        }
        if let Some(durable) = &self.durable
            && let Err(e) = durable.insert(&owned_key, entry).await
        {
            warn!(key, error = %e, "durable write failed");
        }
        self.telemetry.record(&self.name, key, CacheActivity::Inserted);
    }
}

/// Deserializes a cached JSON value, degrading failures to a miss.
fn decode<T: DeserializeOwned>(key: &str, value: &Value) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "cached value failed to deserialize; treating as miss");
            None
        }
    }
}
