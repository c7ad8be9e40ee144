//! Cache Module
//!
//! Provides a size-bounded key-value store that concrete eviction policies
//! build on.

mod builder;
mod entry;
mod iter;
mod policy;
mod size;
mod stats;
mod store;

#[cfg(test)]
mod test_policies;

// Re-export public types
pub use builder::BoundedStoreBuilder;
pub(crate) use entry::Entry;
pub use iter::{Iter, Keys, Values};
pub use policy::EvictionPolicy;
pub use size::{FnSize, SizeFunction, UnitSize};
pub use stats::StoreStats;
pub use store::{BoundedStore, DefaultFn, Lookup};
