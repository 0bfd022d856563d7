//! A tiered, process-local cache with TTL expiry, stale-while-revalidate and
//! tag invalidation.
//!
//! `cachette` reduces redundant fetches of remotely computed data — record
//! lists, detail records, derived aggregates — by keeping responses in two
//! storage tiers of different durability and speed:
//!
//! - a bounded **memory tier** ([`MemoryTier`]) for fast repeat reads, evicting
//!   oldest-written entries past its capacity;
//! - a **durable tier** ([`DurableTier`]) over any persistent key/value store
//!   ([`DurableStore`]), surviving restarts and feeding the memory tier back.
//!
//! On a read the cache checks memory, then the durable store (promoting fresh
//! finds), and only then invokes the caller-supplied fetch function. Entries
//! expire by TTL; stale entries can be served immediately while a detached
//! background task refreshes them; and groups of logically related entries are
//! removed in bulk by tag.
//!
//! This is a single-process cache. Two processes may share one durable store
//! (under separate namespaces, or even the same one), but each manages it
//! independently — there is no cross-process coherency protocol.
//!
//! # Examples
//!
//! ## Reading through the cache
//!
//! ```
//! use cachette::{Cache, CacheOptions};
//! use std::time::Duration;
//! use tick::Clock;
//!
//! # futures::executor::block_on(async {
//! let clock = Clock::new_frozen();
//! let cache = Cache::builder(clock).name("records").build();
//!
//! let options = CacheOptions::new()
//!     .ttl(Duration::from_secs(300))
//!     .tags(["records"]);
//!
//! // First read misses and runs the fetch function.
//! let value: Vec<String> = cache
//!     .get(
//!         "records?page=1",
//!         || async { Ok::<_, std::io::Error>(vec!["a".to_string(), "b".to_string()]) },
//!         options.clone(),
//!     )
//!     .await?;
//! assert_eq!(value.len(), 2);
//!
//! // Later writes under the same tags can be dropped in one sweep.
//! cache.invalidate_by_tags(["records"]).await;
//! # Ok::<(), cachette::Error>(())
//! # });
//! ```
//!
//! ## Persisting across restarts
//!
//! ```
//! use cachette::{Cache, CacheOptions, FsStore};
//! use tick::Clock;
//!
//! # futures::executor::block_on(async {
//! let dir = tempfile::tempdir().unwrap();
//!
//! let cache = Cache::builder(Clock::new_frozen())
//!     .durable(FsStore::new(dir.path()), "records-v1")
//!     .build();
//! cache.set("detail/7", &"seven", CacheOptions::new()).await?;
//!
//! // A new cache instance over the same store sees the entry.
//! let reopened = Cache::builder(Clock::new_frozen())
//!     .durable(FsStore::new(dir.path()), "records-v1")
//!     .build();
//! let value: String = reopened
//!     .get("detail/7", || async { Err(std::io::Error::other("unreachable")) }, CacheOptions::new())
//!     .await?;
//! assert_eq!(value, "seven");
//! # Ok::<(), cachette::Error>(())
//! # });
//! ```

pub mod builder;
pub mod cache;
pub mod error;
mod options;
mod revalidate;
mod telemetry;

#[doc(inline)]
pub use builder::CacheBuilder;
#[doc(inline)]
pub use cache::{BatchRequest, Cache};
#[doc(inline)]
pub use cachette_durable::{DurableStore, DurableTier, FsStore, StoreError};
#[doc(inline)]
pub use cachette_memory::MemoryTier;
#[doc(inline)]
pub use cachette_tier::{CacheEntry, CacheTier};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use options::CacheOptions;
#[doc(inline)]
pub use telemetry::CacheStats;
