//! Bounded in-memory tier for the cachette tiered cache.
//!
//! This crate provides [`MemoryTier`], the fast first tier of the cache: a bounded
//! map from key to entry with deterministic eviction. When the configured capacity
//! is exceeded, the entries with the oldest write timestamp are evicted first, with
//! ties broken by insertion order. Inserts therefore never fail due to capacity.
//!
//! The tier is a passive store: it never filters reads on freshness, so a stale
//! entry stays readable until the orchestrator overwrites or removes it. It is also
//! never the sole source of truth; the durable tier can fully reconstruct it.
//!
//! # Quick Start
//!
//! ```
//! use cachette_memory::MemoryTier;
//! use cachette_tier::{CacheEntry, CacheTier};
//!
//! # futures::executor::block_on(async {
//! let tier = MemoryTier::<String, i32>::builder()
//!     .max_entries(1000)
//!     .build();
//!
//! tier.insert(&"key".to_string(), CacheEntry::new(42)).await?;
//! let value = tier.get(&"key".to_string()).await?;
//! assert_eq!(*value.unwrap().value(), 42);
//! # Ok::<(), cachette_tier::Error>(())
//! # });
//! ```

pub mod builder;
pub mod tier;

#[doc(inline)]
pub use builder::MemoryTierBuilder;
#[doc(inline)]
pub use tier::MemoryTier;
