//! Size Function Module
//!
//! Computes the size contribution of a value stored in a [`BoundedStore`].
//!
//! The store enforces `Σ size(value) <= capacity`. By default every value
//! costs 1 unit ([`UnitSize`]), so capacity is simply the maximum number of
//! entries. A custom size function bounds something else, such as bytes.
//!
//! [`BoundedStore`]: crate::cache::BoundedStore

/// Computes the size of a value being stored.
///
/// Zero is a legal size: zero-sized values never count against capacity.
pub trait SizeFunction<V> {
    fn size_of(&self, value: &V) -> usize;
}

/// Every value costs exactly 1 unit. This is the default size function.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitSize;

impl<V> SizeFunction<V> for UnitSize {
    #[inline]
    fn size_of(&self, _value: &V) -> usize {
        1
    }
}

/// A size function backed by a closure.
///
/// Created via [`BoundedStoreBuilder::size_fn`](crate::cache::BoundedStoreBuilder::size_fn).
#[derive(Clone, Copy)]
pub struct FnSize<F>(pub F);

impl<V, F> SizeFunction<V> for FnSize<F>
where
    F: Fn(&V) -> usize,
{
    #[inline]
    fn size_of(&self, value: &V) -> usize {
        (self.0)(value)
    }
}
