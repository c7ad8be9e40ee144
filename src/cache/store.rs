//! Bounded Store Module
//!
//! Main storage engine: a HashMap of sized entries held under a fixed
//! capacity, with the choice of eviction victim delegated to a policy.

use std::borrow::Borrow;
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::cache::{
    Entry, EvictionPolicy, Iter, Keys, SizeFunction, StoreStats, UnitSize, Values,
};
use crate::error::{Result, StoreError};

/// Computes a value for a key that is not in the store.
pub type DefaultFn<K, V> = Box<dyn Fn(&K) -> anyhow::Result<V>>;

// == Lookup ==
/// Outcome of [`BoundedStore::lookup`], keeping absence apart from failure.
#[derive(Debug)]
pub enum Lookup<V> {
    /// The value was stored, or computed by the default-value function
    Found(V),
    /// The key is absent and no default applies
    Missing,
    /// The default-value function (or the write-back) failed
    Failed(StoreError),
}

impl<V> Lookup<V> {
    /// Returns the value if one was found.
    pub fn found(self) -> Option<V> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Converts absence into `Ok(None)` and keeps real failures as errors.
    pub fn into_result(self) -> Result<Option<V>> {
        match self {
            Lookup::Found(value) => Ok(Some(value)),
            Lookup::Missing => Ok(None),
            Lookup::Failed(err) => Err(err),
        }
    }
}

// == Bounded Store ==
/// Key-value store whose total entry size never exceeds a fixed capacity.
///
/// Each value's size is computed once by the size function `S` when it is
/// written. When a write would push the total over capacity, the store asks
/// the policy `P` for victims, one at a time, until the write fits.
///
/// Capacity, size function and default-value function are fixed at
/// construction.
pub struct BoundedStore<K, V, P, S = UnitSize> {
    /// Key-value storage with cached sizes
    entries: HashMap<K, Entry<V>>,
    /// Victim selection
    policy: P,
    size_fn: S,
    /// Fallback used on read miss
    default_fn: Option<DefaultFn<K, V>>,
    stats: StoreStats,
    track_stats: bool,
    capacity: usize,
    /// Sum of all entry sizes
    current_size: usize,
}

impl<K, V, P> BoundedStore<K, V, P, UnitSize>
where
    K: Hash + Eq,
    P: EvictionPolicy<K, V>,
{
    // == Constructor ==
    /// Creates a store bounded by entry count, with no default-value function.
    ///
    /// Use [`BoundedStoreBuilder`](crate::cache::BoundedStoreBuilder) to supply
    /// a size function or default-value function.
    pub fn new(capacity: usize, policy: P) -> Self {
        Self::from_parts(capacity, policy, UnitSize, None, true)
    }
}

impl<K, V, P, S> BoundedStore<K, V, P, S>
where
    K: Hash + Eq,
    P: EvictionPolicy<K, V>,
    S: SizeFunction<V>,
{
    pub(crate) fn from_parts(
        capacity: usize,
        policy: P,
        size_fn: S,
        default_fn: Option<DefaultFn<K, V>>,
        track_stats: bool,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
            size_fn,
            default_fn,
            stats: StoreStats::new(),
            track_stats,
            capacity,
            current_size: 0,
        }
    }

    // == Contains ==
    /// Returns true if an entry for `key` is stored.
    ///
    /// Never triggers the default-value function.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    // == Peek ==
    /// Returns the stored value for `key` without any side effect.
    ///
    /// The policy is not notified and no statistics are recorded.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Get ==
    /// Retrieves the value for `key`.
    ///
    /// On a miss the default-value function, if configured, computes a value
    /// which is written back through [`set`](Self::set) before being returned.
    /// That write goes through the full capacity checks: it may evict other
    /// entries, and a computed value larger than the whole store is rejected.
    ///
    /// # Errors
    /// - [`StoreError::KeyNotFound`] if absent and no default function is set
    /// - [`StoreError::DefaultComputation`] if the default function failed;
    ///   the store is left unchanged
    /// - [`StoreError::ValueTooLarge`] if the computed value alone exceeds
    ///   capacity; the value is dropped and the store is left unchanged
    pub fn get<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        V: Clone,
    {
        if let Some(value) = self.access(key) {
            return Ok(value);
        }

        let Some(default_fn) = &self.default_fn else {
            return Err(StoreError::KeyNotFound);
        };

        let key = key.to_owned();
        let value = default_fn(&key).map_err(StoreError::DefaultComputation)?;
        self.record(StoreStats::record_computed);

        self.set(key, value.clone())?;
        debug!(size = self.current_size, "memoized default value");

        Ok(value)
    }

    // == Lookup ==
    /// Like [`get`](Self::get), but reports absence as [`Lookup::Missing`]
    /// instead of an error.
    pub fn lookup<Q>(&mut self, key: &Q) -> Lookup<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        V: Clone,
    {
        match self.get(key) {
            Ok(value) => Lookup::Found(value),
            Err(StoreError::KeyNotFound) => Lookup::Missing,
            Err(err) => Lookup::Failed(err),
        }
    }

    // == Get Or ==
    /// Returns the stored value for `key`, or `default` if absent.
    ///
    /// Never invokes the default-value function and never stores `default`.
    pub fn get_or<Q>(&mut self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.access(key).unwrap_or(default)
    }

    // == Set ==
    /// Stores `value` under `key`, evicting other entries if needed.
    ///
    /// Eviction only happens when the new value is larger than the one it
    /// replaces. The policy is asked for one victim per loop iteration until
    /// the write fits.
    ///
    /// # Errors
    /// - [`StoreError::ValueTooLarge`] if the value alone exceeds capacity;
    ///   nothing is modified and nothing is evicted
    /// - [`StoreError::EvictionFailed`] if the policy stops offering valid
    ///   victims while the store is still over capacity
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        let new_size = self.size_fn.size_of(&value);
        let old_size = self.entries.get(&key).map_or(0, |entry| entry.size);

        if new_size > old_size {
            if new_size > self.capacity {
                return Err(StoreError::ValueTooLarge {
                    size: new_size,
                    capacity: self.capacity,
                });
            }
            self.make_room(&key, new_size)?;
        }

        match self.entries.entry(key) {
            hash_map::Entry::Occupied(mut slot) => {
                let old = slot.insert(Entry::new(value, new_size));
                self.current_size = self.current_size - old.size + new_size;
                self.policy.on_update(slot.key());
            }
            hash_map::Entry::Vacant(slot) => {
                self.policy.on_insert(slot.key());
                slot.insert(Entry::new(value, new_size));
                self.current_size += new_size;
            }
        }

        Ok(())
    }

    // == Set Default ==
    /// Returns the stored value for `key`, or stores `value` and returns it.
    pub fn set_default(&mut self, key: K, value: V) -> Result<V>
    where
        V: Clone,
    {
        if let Some(existing) = self.access(&key) {
            return Ok(existing);
        }
        self.set(key, value.clone())?;
        Ok(value)
    }

    // == Delete ==
    /// Removes the entry for `key`.
    ///
    /// Never triggers the default-value function.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.pop(key).map(|_| ())
    }

    // == Pop ==
    /// Removes the entry for `key` and returns its value.
    pub fn pop<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (key, entry) = self
            .entries
            .remove_entry(key)
            .ok_or(StoreError::KeyNotFound)?;
        self.current_size -= entry.size;
        self.policy.on_remove(&key);
        Ok(entry.into_value())
    }

    // == Pop Item ==
    /// Removes and returns the entry the policy would evict next.
    ///
    /// Fails with [`StoreError::KeyNotFound`] on an empty store.
    pub fn pop_item(&mut self) -> Result<(K, V)> {
        if self.entries.is_empty() {
            return Err(StoreError::KeyNotFound);
        }
        let (key, entry) = self.evict_one()?;
        Ok((key, entry.into_value()))
    }

    // == Clear ==
    /// Removes every entry, notifying the policy of each removal.
    pub fn clear(&mut self) {
        for (key, _) in self.entries.drain() {
            self.policy.on_remove(&key);
        }
        self.current_size = 0;
    }

    // == Iteration ==
    /// Iterates over stored keys. Never triggers the default-value function.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.entries.iter())
    }

    // == Values ==
    /// Iterates over stored values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.entries.values())
    }

    // == Iter ==
    /// Iterates over stored `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.entries.iter())
    }

    // == Length ==
    /// Returns the number of stored entries.
    ///
    /// Differs from [`size`](Self::size) whenever the size function is not
    /// the unit size.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Size ==
    /// Returns the sum of all stored entry sizes.
    pub fn size(&self) -> usize {
        self.current_size
    }

    // == Capacity ==
    /// Returns the fixed capacity set at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Size Of ==
    /// Returns the size `value` would have if stored, without storing it.
    pub fn size_of(&self, value: &V) -> usize {
        self.size_fn.size_of(value)
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Policy ==
    /// Returns the eviction policy, e.g. to inspect its ordering index.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    // == Internals ==
    /// Reads a stored value as a use: notifies the policy and records a hit
    /// or miss.
    fn access<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        match self.entries.get_key_value(key) {
            Some((key, entry)) => {
                self.policy.on_access(key);
                let value = entry.value.clone();
                self.record(StoreStats::record_hit);
                Some(value)
            }
            None => {
                self.record(StoreStats::record_miss);
                None
            }
        }
    }

    /// Evicts until `new_size` fits in place of whatever `key` holds now.
    ///
    /// The size under `key` is re-read on every pass, since the policy may
    /// choose `key` itself as a victim.
    fn make_room(&mut self, key: &K, new_size: usize) -> Result<()> {
        loop {
            let old_size = self.entries.get(key).map_or(0, |entry| entry.size);
            if self.current_size - old_size + new_size <= self.capacity {
                return Ok(());
            }

            let (_, entry) = self.evict_one()?;
            self.record(StoreStats::record_eviction);
            debug!(
                freed = entry.size,
                size = self.current_size,
                capacity = self.capacity,
                "evicted entry"
            );
        }
    }

    /// Asks the policy for one victim and removes it.
    fn evict_one(&mut self) -> Result<(K, Entry<V>)> {
        let Some(victim) = self.policy.evict(Keys::new(self.entries.iter())) else {
            warn!(entries = self.entries.len(), "eviction policy offered no victim");
            return Err(StoreError::EvictionFailed(
                "policy offered no victim".to_string(),
            ));
        };

        match self.entries.remove_entry(&victim) {
            Some((key, entry)) => {
                self.current_size -= entry.size;
                Ok((key, entry))
            }
            None => {
                warn!("eviction policy chose a key that is not stored");
                Err(StoreError::EvictionFailed(
                    "policy chose a key that is not stored".to_string(),
                ))
            }
        }
    }

    fn record(&mut self, counter: fn(&mut StoreStats)) {
        if self.track_stats {
            counter(&mut self.stats);
        }
    }
}

impl<'a, K, V, P, S> IntoIterator for &'a BoundedStore<K, V, P, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self.entries.iter())
    }
}

impl<K, V, P, S> fmt::Debug for BoundedStore<K, V, P, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoundedStore(")?;
        f.debug_list()
            .entries(self.entries.iter().map(|(k, entry)| (k, &entry.value)))
            .finish()?;
        write!(
            f,
            ", capacity={}, size={})",
            self.capacity, self.current_size
        )
    }
}
