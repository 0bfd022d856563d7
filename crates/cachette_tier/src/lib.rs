//! Core cache tier abstractions for the cachette tiered cache.
//!
//! This crate defines the [`CacheTier`] trait that all storage tiers must satisfy,
//! along with [`CacheEntry`] for storing values with metadata and [`Error`] types for
//! fallible operations.
//!
//! # Overview
//!
//! The tier abstraction separates storage mechanics from caching policy. A tier is a
//! passive container: it stores, retrieves and removes entries, and can sweep entries
//! by tag, but it never decides freshness, promotion or eviction-on-read. Those
//! decisions belong to the orchestrating `cachette` crate.
//!
//! # Implementing a Cache Tier
//!
//! Implement all required methods of [`CacheTier`]:
//!
//! ```
//! use cachette_tier::{CacheEntry, CacheTier, Error};
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//!
//! struct SimpleTier<K, V>(RwLock<HashMap<K, CacheEntry<V>>>);
//!
//! impl<K, V> CacheTier<K, V> for SimpleTier<K, V>
//! where
//!     K: Clone + Eq + std::hash::Hash + Send + Sync,
//!     V: Clone + Send + Sync,
//! {
//!     async fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>, Error> {
//!         Ok(self.0.read().unwrap().get(key).cloned())
//!     }
//!
//!     async fn insert(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
//!         self.0.write().unwrap().insert(key.clone(), entry);
//!         Ok(())
//!     }
//!
//!     async fn invalidate(&self, key: &K) -> Result<(), Error> {
//!         self.0.write().unwrap().remove(key);
//!         Ok(())
//!     }
//!
//!     async fn invalidate_tags(&self, tags: &[String]) -> Result<u64, Error> {
//!         let mut map = self.0.write().unwrap();
//!         let before = map.len();
//!         map.retain(|_, entry| !entry.has_any_tag(tags));
//!         Ok((before - map.len()) as u64)
//!     }
//!
//!     async fn clear(&self) -> Result<(), Error> {
//!         self.0.write().unwrap().clear();
//!         Ok(())
//!     }
//! }
//! ```

mod entry;
pub mod error;
pub(crate) mod tier;

#[doc(inline)]
pub use entry::CacheEntry;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use tier::CacheTier;
