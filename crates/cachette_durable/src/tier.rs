//! The durable cache tier: a namespaced, defensive adapter over a [`DurableStore`].

use std::fmt;
use std::sync::Arc;

use cachette_tier::{CacheEntry, CacheTier, Error};
use serde_json::Value;
use tracing::{debug, warn};

use crate::envelope::Envelope;
use crate::store::DurableStore;

/// A [`CacheTier`] over any [`DurableStore`].
///
/// Entries are persisted under `<namespace>/<key>` as a versioned JSON envelope.
/// Every store failure is absorbed here: reads degrade to misses, writes to
/// no-ops, and the tag sweep to a partial (or empty) result. Nothing the store
/// does can surface as an error to the cache above — when the store is entirely
/// unavailable the cache simply operates memory-only.
///
/// Corrupt or version-incompatible entries are removed when encountered, so a
/// bad byte sequence is decoded (and logged) at most once.
///
/// # Examples
///
/// ```
/// use cachette_durable::{DurableTier, FsStore};
/// use cachette_tier::{CacheEntry, CacheTier};
/// use serde_json::Value;
///
/// # futures::executor::block_on(async {
/// let dir = tempfile::tempdir().unwrap();
/// let tier = DurableTier::new(FsStore::new(dir.path()), "records");
///
/// tier.insert(&"all".to_string(), CacheEntry::new(Value::from(42))).await?;
/// let entry = tier.get(&"all".to_string()).await?;
/// assert_eq!(*entry.unwrap().value(), Value::from(42));
/// # Ok::<(), cachette_tier::Error>(())
/// # });
/// ```
#[derive(Clone)]
pub struct DurableTier {
    store: Arc<dyn DurableStore>,
    namespace: String,
}

impl fmt::Debug for DurableTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DurableTier")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl DurableTier {
    /// Creates a tier over `store`, scoping all keys under `namespace`.
    pub fn new(store: impl DurableStore + 'static, namespace: impl Into<String>) -> Self {
        Self {
            store: Arc::new(store),
            namespace: namespace.into(),
        }
    }

    /// Returns the namespace all keys of this tier are scoped under.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}/{}", self.namespace, key)
    }

    fn key_prefix(&self) -> String {
        format!("{}/", self.namespace)
    }

    /// Decodes stored bytes, removing the entry if it cannot be understood.
    fn decode(&self, storage_key: &str, bytes: &[u8]) -> Option<CacheEntry<Value>> {
        match serde_json::from_slice::<Envelope>(bytes) {
            Ok(envelope) => {
                let entry = envelope.into_entry();
                if entry.is_none() {
                    debug!(key = storage_key, "discarding durable entry with incompatible schema version");
                    self.remove_quietly(storage_key);
                }
                entry
            }
            Err(e) => {
                warn!(key = storage_key, error = %e, "corrupt durable entry; removing");
                self.remove_quietly(storage_key);
                None
            }
        }
    }

    fn remove_quietly(&self, storage_key: &str) {
        if let Err(e) = self.store.remove(storage_key) {
            debug!(key = storage_key, error = %e, "failed to remove durable entry");
        }
    }
}

impl CacheTier<String, Value> for DurableTier {
    async fn get(&self, key: &String) -> Result<Option<CacheEntry<Value>>, Error> {
        let storage_key = self.storage_key(key);
        let bytes = match self.store.read(&storage_key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(key = %key, error = %e, "durable read failed; treating as miss");
                return Ok(None);
            }
        };
        Ok(self.decode(&storage_key, &bytes))
    }

    async fn insert(&self, key: &String, entry: CacheEntry<Value>) -> Result<(), Error> {
        let bytes = match serde_json::to_vec(&Envelope::from_entry(&entry)) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key = %key, error = %e, "failed to serialize durable entry; dropping write");
                return Ok(());
            }
        };
        if let Err(e) = self.store.write(&self.storage_key(key), &bytes) {
            warn!(key = %key, error = %e, "durable write failed; dropping write");
        }
        Ok(())
    }

    async fn invalidate(&self, key: &String) -> Result<(), Error> {
        if let Err(e) = self.store.remove(&self.storage_key(key)) {
            warn!(key = %key, error = %e, "durable remove failed");
        }
        Ok(())
    }

    /// Removes every entry whose tags intersect `tags`.
    ///
    /// The store has no secondary index on tags, so this enumerates all keys
    /// under the namespace and decodes each envelope — an O(N) sweep, acceptable
    /// at the expected scale of tens to low hundreds of entries.
    async fn invalidate_tags(&self, tags: &[String]) -> Result<u64, Error> {
        let keys = match self.store.keys_with_prefix(&self.key_prefix()) {
            Ok(keys) => keys,
            Err(e) => {
                warn!(namespace = %self.namespace, error = %e, "durable enumeration failed; skipping tag sweep");
                return Ok(0);
            }
        };

        let mut removed = 0;
        for storage_key in keys {
            let bytes = match self.store.read(&storage_key) {
                Ok(Some(bytes)) => bytes,
                Ok(None) => continue,
                Err(e) => {
                    debug!(key = %storage_key, error = %e, "durable read failed during tag sweep");
                    continue;
                }
            };
            let Some(entry) = self.decode(&storage_key, &bytes) else {
                continue;
            };
            if entry.has_any_tag(tags) {
                self.remove_quietly(&storage_key);
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn clear(&self) -> Result<(), Error> {
        let keys = match self.store.keys_with_prefix(&self.key_prefix()) {
            Ok(keys) => keys,
            Err(e) => {
                warn!(namespace = %self.namespace, error = %e, "durable enumeration failed; skipping clear");
                return Ok(());
            }
        };
        for storage_key in keys {
            self.remove_quietly(&storage_key);
        }
        Ok(())
    }

    fn len(&self) -> Option<u64> {
        self.store
            .keys_with_prefix(&self.key_prefix())
            .ok()
            .map(|keys| keys.len() as u64)
    }
}
