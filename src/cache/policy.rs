//! Eviction Policy Module
//!
//! The seam where concrete caches (LRU, LFU, random, ...) plug into a
//! [`BoundedStore`](crate::cache::BoundedStore).

use crate::cache::Keys;

// == Eviction Policy ==
/// Chooses which entry leaves the store when it runs out of room.
///
/// All methods are called synchronously from inside the store operation that
/// triggered them. None of them receive a mutable handle to the store, so a
/// policy cannot re-enter it.
///
/// The store calls [`evict`](Self::evict) only while it holds at least one
/// entry and still needs to free space. The returned key must name an entry
/// currently in the store; the store removes it and adjusts its size
/// accounting. The policy is expected to forget the victim itself: the store
/// does not call [`on_remove`](Self::on_remove) for keys chosen by `evict`.
///
/// The notification hooks let a policy maintain its own ordering index. They
/// default to no-ops.
pub trait EvictionPolicy<K, V> {
    /// Selects the next victim among `keys`.
    ///
    /// Returns `None` if the policy has nothing to offer, which the store
    /// reports as [`StoreError::EvictionFailed`](crate::StoreError::EvictionFailed).
    fn evict(&mut self, keys: Keys<'_, K, V>) -> Option<K>;

    /// Called when a new key is stored, just before its entry is written.
    fn on_insert(&mut self, _key: &K) {}

    /// Called after the value of an existing key is replaced.
    fn on_update(&mut self, _key: &K) {}

    /// Called when a stored key is read through the store.
    fn on_access(&mut self, _key: &K) {}

    /// Called when a key is removed explicitly (delete, pop, clear).
    fn on_remove(&mut self, _key: &K) {}
}
