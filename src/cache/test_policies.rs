//! Eviction policies used by the unit and property tests.
//!
//! Keys are kept in a VecDeque where:
//! - Front = next victim
//! - Back = most recently inserted (FIFO) or used (LRU)

use std::collections::VecDeque;

use crate::cache::{EvictionPolicy, Keys};

// == FIFO Policy ==
/// Evicts keys in insertion order. Overwrites keep their position.
#[derive(Debug, Default)]
pub struct FifoPolicy<K> {
    order: VecDeque<K>,
}

impl<K: Clone + PartialEq> FifoPolicy<K> {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn peek_next(&self) -> Option<&K> {
        self.order.front()
    }
}

impl<K: Clone + PartialEq, V> EvictionPolicy<K, V> for FifoPolicy<K> {
    fn evict(&mut self, _keys: Keys<'_, K, V>) -> Option<K> {
        self.order.pop_front()
    }

    fn on_insert(&mut self, key: &K) {
        self.order.push_back(key.clone());
    }

    fn on_remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }
}

// == LRU Policy ==
/// Evicts the least recently used key. Inserts, overwrites and reads all
/// count as a use.
#[derive(Debug, Default)]
pub struct LruPolicy<K> {
    order: VecDeque<K>,
}

impl<K: Clone + PartialEq> LruPolicy<K> {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to back).
    fn touch(&mut self, key: &K) {
        self.forget(key);
        self.order.push_back(key.clone());
    }

    fn forget(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.front()
    }
}

impl<K: Clone + PartialEq, V> EvictionPolicy<K, V> for LruPolicy<K> {
    fn evict(&mut self, _keys: Keys<'_, K, V>) -> Option<K> {
        self.order.pop_front()
    }

    fn on_insert(&mut self, key: &K) {
        self.touch(key);
    }

    fn on_update(&mut self, key: &K) {
        self.touch(key);
    }

    fn on_access(&mut self, key: &K) {
        self.touch(key);
    }

    fn on_remove(&mut self, key: &K) {
        self.forget(key);
    }
}

// == Arbitrary Policy ==
/// Keeps no index at all; evicts whichever key the store lists first.
#[derive(Debug, Default)]
pub struct AnyPolicy;

impl<K: Clone, V> EvictionPolicy<K, V> for AnyPolicy {
    fn evict(&mut self, mut keys: Keys<'_, K, V>) -> Option<K> {
        keys.next().cloned()
    }
}

// == Misbehaving Policies ==
/// Never offers a victim.
#[derive(Debug, Default)]
pub struct NoVictimPolicy;

impl<K, V> EvictionPolicy<K, V> for NoVictimPolicy {
    fn evict(&mut self, _keys: Keys<'_, K, V>) -> Option<K> {
        None
    }
}

/// Always names the same key, whether or not it is stored.
#[derive(Debug)]
pub struct GhostPolicy<K>(pub K);

impl<K: Clone, V> EvictionPolicy<K, V> for GhostPolicy<K> {
    fn evict(&mut self, _keys: Keys<'_, K, V>) -> Option<K> {
        Some(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::cache::Entry;

    fn no_keys() -> HashMap<String, Entry<()>> {
        HashMap::new()
    }

    fn evict<P: EvictionPolicy<String, ()>>(policy: &mut P) -> Option<String> {
        let map = no_keys();
        policy.evict(Keys::new(map.iter()))
    }

    #[test]
    fn test_fifo_ignores_overwrites() {
        let mut fifo = FifoPolicy::new();
        EvictionPolicy::<String, ()>::on_insert(&mut fifo, &"a".to_string());
        EvictionPolicy::<String, ()>::on_insert(&mut fifo, &"b".to_string());
        EvictionPolicy::<String, ()>::on_update(&mut fifo, &"a".to_string());

        assert_eq!(fifo.peek_next(), Some(&"a".to_string()));
        assert_eq!(evict(&mut fifo), Some("a".to_string()));
        assert_eq!(evict(&mut fifo), Some("b".to_string()));
        assert_eq!(evict(&mut fifo), None);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruPolicy::new();

        for key in ["a", "b", "c"] {
            EvictionPolicy::<String, ()>::on_insert(&mut lru, &key.to_string());
        }
        for key in ["a", "c", "b"] {
            EvictionPolicy::<String, ()>::on_access(&mut lru, &key.to_string());
        }

        assert_eq!(evict(&mut lru), Some("a".to_string()));
        assert_eq!(evict(&mut lru), Some("c".to_string()));
        assert_eq!(evict(&mut lru), Some("b".to_string()));
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruPolicy::new();
        EvictionPolicy::<String, ()>::on_insert(&mut lru, &"a".to_string());
        EvictionPolicy::<String, ()>::on_insert(&mut lru, &"b".to_string());
        EvictionPolicy::<String, ()>::on_remove(&mut lru, &"a".to_string());

        assert_eq!(lru.peek_oldest(), Some(&"b".to_string()));
    }

    #[test]
    fn test_any_policy_empty() {
        assert_eq!(evict(&mut AnyPolicy), None);
    }
}
