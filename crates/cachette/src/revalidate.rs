//! Bookkeeping for detached background revalidations.

use std::collections::HashSet;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Tracks in-flight background revalidations.
///
/// A key is marked in flight before its refresh task is spawned, so a second
/// stale read of the same key does not spawn a duplicate task. Task handles
/// are retained until [`wait_all`](Self::wait_all) collects them, which gives
/// test suites a deterministic join point instead of sleep-polling.
#[derive(Debug, Default)]
pub(crate) struct Revalidations {
    in_flight: Mutex<HashSet<String>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl Revalidations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this key was successfully marked as in flight
    /// (i.e. no revalidation for it is already running).
    pub(crate) fn try_start(&self, key: &str) -> bool {
        self.in_flight.lock().insert(key.to_string())
    }

    /// Marks the key as no longer in flight.
    pub(crate) fn finish(&self, key: &str) {
        self.in_flight.lock().remove(key);
    }

    /// Retains a handle so the task can be joined later.
    pub(crate) fn register(&self, handle: JoinHandle<()>) {
        let mut pending = self.pending.lock();
        pending.retain(|pending_handle| !pending_handle.is_finished());
        pending.push(handle);
    }

    /// Joins every revalidation issued so far.
    ///
    /// The handle list is not held locked across awaits, so revalidations
    /// triggered while waiting are picked up by the next round.
    pub(crate) async fn wait_all(&self) {
        loop {
            let drained: Vec<_> = std::mem::take(&mut *self.pending.lock());
            if drained.is_empty() {
                break;
            }
            for handle in drained {
                // A panicked refresh task already left the entry stale; there
                // is nothing further to unwind here.
                let _ = handle.await;
            }
        }
    }
}
