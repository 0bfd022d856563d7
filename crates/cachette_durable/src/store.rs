//! The interface consumed from a persistent key/value store.

use crate::error::StoreError;

/// A persistent, byte-level key/value store.
///
/// This is the full extent of what the cache requires from its durable backing:
/// point reads and writes, removal, and enumeration of keys by prefix (used only
/// by the tag-invalidation sweep, since the store has no secondary index on
/// tags).
///
/// Implementations may fail freely — quota exhaustion, disabled storage, a
/// vanished directory. [`DurableTier`](crate::DurableTier) treats every failure
/// as a miss (reads) or a no-op (writes), so implementations should report
/// errors honestly rather than paper over them.
pub trait DurableStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` if the key is absent.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `bytes` under `key`, overwriting any previous value.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Removes the value stored under `key`.
    ///
    /// Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Returns every stored key that starts with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
