//! Store Entry Module
//!
//! Defines a stored value together with its cached size.

// == Entry ==
/// A stored value and the size computed for it at insertion time.
///
/// The size is authoritative until the entry is overwritten or removed; it is
/// never recomputed, even if the size function would now answer differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// The stored value
    pub value: V,
    /// Size contribution of this entry to the store total
    pub size: usize,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates a new entry with a precomputed size.
    pub fn new(value: V, size: usize) -> Self {
        Self { value, size }
    }

    // == Into Value ==
    /// Consumes the entry, returning the stored value.
    pub fn into_value(self) -> V {
        self.value
    }
}
