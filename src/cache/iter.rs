//! Store Iterators
//!
//! Lazy views over a store's contents. None of them trigger default-value
//! computation or touch size accounting.

use std::collections::hash_map;
use std::iter::FusedIterator;

use crate::cache::Entry;

/// Iterator over the keys of a store, in arbitrary order.
pub struct Keys<'a, K, V> {
    inner: hash_map::Iter<'a, K, Entry<V>>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: hash_map::Iter<'a, K, Entry<V>>) -> Self {
        Self { inner }
    }

    /// Returns the next key together with the size cached for its entry.
    ///
    /// Lets size-aware policies weigh candidates without looking up values.
    pub fn next_with_size(&mut self) -> Option<(&'a K, usize)> {
        self.inner.next().map(|(k, e)| (k, e.size))
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of a store.
pub struct Values<'a, K, V> {
    inner: hash_map::Values<'a, K, Entry<V>>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: hash_map::Values<'a, K, Entry<V>>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| &e.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Iterator over `(key, value)` pairs of a store.
pub struct Iter<'a, K, V> {
    inner: hash_map::Iter<'a, K, Entry<V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(inner: hash_map::Iter<'a, K, Entry<V>>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, e)| (k, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}
