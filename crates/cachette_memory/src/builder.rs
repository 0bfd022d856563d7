//! Builder for configuring in-memory tiers.

use std::hash::Hash;
use std::marker::PhantomData;

use crate::tier::MemoryTier;

/// Builder for configuring a [`MemoryTier`].
///
/// # Examples
///
/// ```
/// use cachette_memory::MemoryTier;
///
/// let tier = MemoryTier::<String, i32>::builder()
///     .max_entries(1000)
///     .build();
/// ```
#[derive(Debug)]
pub struct MemoryTierBuilder<K, V> {
    pub(crate) max_entries: Option<usize>,
    _phantom: PhantomData<(K, V)>,
}

impl<K, V> Default for MemoryTierBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoryTierBuilder<K, V> {
    /// Creates a new builder with default settings.
    ///
    /// The default configuration is an unbounded tier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_entries: None,
            _phantom: PhantomData,
        }
    }

    /// Sets the maximum number of entries the tier may hold.
    ///
    /// After every insert that pushes the tier past this bound, entries with
    /// the oldest write timestamp are evicted until the bound holds. Inserts
    /// themselves never fail due to capacity.
    #[must_use]
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Builds the configured [`MemoryTier`].
    #[must_use]
    pub fn build(self) -> MemoryTier<K, V>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        MemoryTier::from_builder(&self)
    }
}
