//! Bounded Store - a generic size-bounded key-value store
//!
//! Provides size accounting, capacity enforcement and memoized default values,
//! leaving the choice of eviction victim to a pluggable policy.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{BoundedStore, BoundedStoreBuilder, EvictionPolicy, Lookup};
pub use config::Config;
pub use error::{Result, StoreError};
