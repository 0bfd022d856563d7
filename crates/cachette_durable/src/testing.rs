//! Mock durable store for testing.
//!
//! This module provides [`MockStore`], an in-memory [`DurableStore`] that records
//! all operations and supports failure injection, for testing the degradation
//! paths of the tiers and the cache built on top of them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::StoreError;
use crate::store::DurableStore;

/// Recorded store operation with its key (or prefix, for enumerations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// A read was performed for the given key.
    Read(String),
    /// A write was performed for the given key.
    Write(String),
    /// A removal was performed for the given key.
    Remove(String),
    /// Keys were enumerated with the given prefix.
    List(String),
}

type FailPredicate = Box<dyn Fn(&StoreOp) -> bool + Send + Sync>;

/// A configurable in-memory store for testing.
///
/// Values live in a shared map, every operation is recorded, and a predicate can
/// mark operations as failing, which exercises the cache's degrade-to-miss and
/// drop-the-write paths.
///
/// # Examples
///
/// ```
/// use cachette_durable::{DurableStore, testing::{MockStore, StoreOp}};
///
/// let store = MockStore::new();
/// store.write("ns/key", b"bytes").unwrap();
///
/// // Fail all reads from here on.
/// store.fail_when(|op| matches!(op, StoreOp::Read(_)));
/// assert!(store.read("ns/key").is_err());
/// ```
pub struct MockStore {
    data: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    operations: Arc<Mutex<Vec<StoreOp>>>,
    fail_when: Arc<Mutex<Option<FailPredicate>>>,
}

impl fmt::Debug for MockStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockStore")
            .field("data", &self.data)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl Clone for MockStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Creates a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Sets a predicate that determines which operations fail.
    ///
    /// The predicate receives the operation and returns `true` if it should fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use cachette_durable::testing::{MockStore, StoreOp};
    ///
    /// let store = MockStore::new();
    ///
    /// // Fail everything, simulating disabled storage.
    /// store.fail_when(|_| true);
    ///
    /// // Fail only writes, simulating quota exhaustion.
    /// store.fail_when(|op| matches!(op, StoreOp::Write(_)));
    /// ```
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&StoreOp) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<StoreOp> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns `true` if the store holds a value under the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.lock().contains_key(key)
    }

    fn record(&self, op: StoreOp) {
        self.operations.lock().push(op);
    }

    fn should_fail(&self, op: &StoreOp) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }

    fn run<T>(&self, op: StoreOp, action: impl FnOnce() -> T) -> Result<T, StoreError> {
        let failed = self.should_fail(&op);
        self.record(op);
        if failed {
            return Err(StoreError::caused_by("mock: operation failed"));
        }
        Ok(action())
    }
}

impl DurableStore for MockStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.run(StoreOp::Read(key.to_string()), || self.data.lock().get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.run(StoreOp::Write(key.to_string()), || {
            self.data.lock().insert(key.to_string(), bytes.to_vec());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.run(StoreOp::Remove(key.to_string()), || {
            self.data.lock().remove(key);
        })
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.run(StoreOp::List(prefix.to_string()), || {
            self.data.lock().keys().filter(|key| key.starts_with(prefix)).cloned().collect()
        })
    }
}
