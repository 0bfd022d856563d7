//! Durable key/value tier for the cachette tiered cache.
//!
//! This crate provides the slow-but-persistent second tier of the cache. It is
//! built from two pieces:
//!
//! - [`DurableStore`]: the narrow interface the cache consumes from a persistent
//!   key/value store — byte-level get, set, remove and enumerate-by-prefix. The
//!   built-in [`FsStore`] persists one file per key under a root directory.
//! - [`DurableTier`]: a [`CacheTier`](cachette_tier::CacheTier) over any
//!   `DurableStore`, adding a key namespace and a versioned serialization
//!   envelope.
//!
//! The tier is defensive by design: a failing or missing store never surfaces an
//! error to the cache. Reads that fail for any reason (store unavailable,
//! malformed bytes, incompatible envelope version) degrade to a miss, and corrupt
//! entries are deleted so they are not repeatedly decoded. Writes that fail are
//! logged and dropped. External eviction of durable entries — a store reclaiming
//! space on its own — is therefore an expected condition, not a corruption.
//!
//! Entries are persisted as a JSON envelope carrying a schema version alongside
//! the write timestamp, TTL and tags, so a format change is detected and the
//! entry discarded rather than misinterpreted.

pub mod error;
mod envelope;
pub mod fs;
pub mod store;
pub mod tier;

#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use error::StoreError;
#[doc(inline)]
pub use fs::FsStore;
#[doc(inline)]
pub use store::DurableStore;
#[doc(inline)]
pub use tier::DurableTier;
