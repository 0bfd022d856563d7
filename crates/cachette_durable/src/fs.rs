//! Filesystem-backed durable store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::store::DurableStore;

/// A [`DurableStore`] persisting one file per key under a root directory.
///
/// File names are the hex encoding of the key, so arbitrary key strings —
/// including namespace separators and filter-parameter encodings — map to valid
/// file names and can be decoded back during prefix enumeration.
///
/// Construction is infallible; the root directory is created on the first
/// write. A root that cannot be created or read surfaces as `StoreError` from
/// the individual operations, which the tier above degrades to misses.
///
/// # Examples
///
/// ```
/// use cachette_durable::{DurableStore, FsStore};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = FsStore::new(dir.path());
///
/// store.write("records/all", b"payload").unwrap();
/// assert_eq!(store.read("records/all").unwrap().as_deref(), Some(b"payload".as_slice()));
/// ```
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory of this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(hex::encode(key))
    }
}

impl DurableStore for FsStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::caused_by(e)),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root).map_err(StoreError::caused_by)?;
        std::fs::write(self.path_for(key), bytes).map_err(StoreError::caused_by)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::caused_by(e)),
        }
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let dir = match std::fs::read_dir(&self.root) {
            Ok(dir) => dir,
            // No writes have happened yet; an absent root holds no keys.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::caused_by(e)),
        };

        let mut keys = Vec::new();
        for entry in dir {
            let entry = entry.map_err(StoreError::caused_by)?;
            let name = entry.file_name();
            // Files whose names don't decode back to a key are not ours; skip them.
            let Some(name) = name.to_str() else { continue };
            let Ok(raw) = hex::decode(name) else { continue };
            let Ok(key) = String::from_utf8(raw) else { continue };
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
