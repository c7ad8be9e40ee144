//! Store Builder Module
//!
//! Collects the construction-time settings of a [`BoundedStore`]. Once built,
//! none of them can be changed.

use std::hash::Hash;

use crate::cache::{BoundedStore, DefaultFn, EvictionPolicy, FnSize, SizeFunction, UnitSize};
use crate::config::Config;

/// Builder for configuring and constructing a [`BoundedStore`].
///
/// # Example
/// ```
/// use bounded_store::cache::{BoundedStoreBuilder, EvictionPolicy, Keys};
///
/// struct FirstKey;
///
/// impl EvictionPolicy<String, String> for FirstKey {
///     fn evict(&mut self, mut keys: Keys<'_, String, String>) -> Option<String> {
///         keys.next().cloned()
///     }
/// }
///
/// let mut store = BoundedStoreBuilder::new(16)
///     .size_fn(|v: &String| v.len())
///     .default_fn(|k: &String| Ok(k.to_uppercase()))
///     .build(FirstKey);
///
/// assert_eq!(store.get("abc").unwrap(), "ABC");
/// assert_eq!(store.size(), 3);
/// ```
pub struct BoundedStoreBuilder<K, V, S = UnitSize> {
    capacity: usize,
    size_fn: S,
    default_fn: Option<DefaultFn<K, V>>,
    track_stats: bool,
}

impl<K, V> BoundedStoreBuilder<K, V, UnitSize> {
    // == Constructor ==
    /// Creates a builder for a store of the given capacity, with unit sizes,
    /// no default-value function and statistics enabled.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            size_fn: UnitSize,
            default_fn: None,
            track_stats: true,
        }
    }

    /// Starts from the capacity and stats setting in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.capacity).track_stats(config.track_stats)
    }
}

impl<K, V, S> BoundedStoreBuilder<K, V, S> {
    /// Sets the size function via closure.
    pub fn size_fn<F>(self, f: F) -> BoundedStoreBuilder<K, V, FnSize<F>>
    where
        F: Fn(&V) -> usize,
    {
        self.size_function(FnSize(f))
    }

    /// Sets the size function using any type that implements [`SizeFunction`].
    pub fn size_function<T>(self, size_fn: T) -> BoundedStoreBuilder<K, V, T>
    where
        T: SizeFunction<V>,
    {
        BoundedStoreBuilder {
            capacity: self.capacity,
            size_fn,
            default_fn: self.default_fn,
            track_stats: self.track_stats,
        }
    }

    /// Sets the function that computes values for absent keys on read.
    ///
    /// Returned errors reach the caller of `get` unchanged, as
    /// [`StoreError::DefaultComputation`](crate::StoreError::DefaultComputation).
    pub fn default_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&K) -> anyhow::Result<V> + 'static,
    {
        self.default_fn = Some(Box::new(f));
        self
    }

    /// Enables or disables hit/miss/eviction counters (default: enabled).
    pub fn track_stats(mut self, enabled: bool) -> Self {
        self.track_stats = enabled;
        self
    }
}

impl<K, V, S> BoundedStoreBuilder<K, V, S>
where
    K: Hash + Eq,
    S: SizeFunction<V>,
{
    // == Build ==
    /// Builds the store around `policy`.
    pub fn build<P>(self, policy: P) -> BoundedStore<K, V, P, S>
    where
        P: EvictionPolicy<K, V>,
    {
        BoundedStore::from_parts(
            self.capacity,
            policy,
            self.size_fn,
            self.default_fn,
            self.track_stats,
        )
    }
}
