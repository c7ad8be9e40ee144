//! Error types for the bounded store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key absent and no default value applies
    #[error("Key not found")]
    KeyNotFound,

    /// A single value is larger than the whole store
    #[error("Value too large: size {size} exceeds capacity {capacity}")]
    ValueTooLarge { size: usize, capacity: usize },

    /// The eviction policy could not free the space it was asked for
    #[error("Eviction failed: {0}")]
    EvictionFailed(String),

    /// The configured default-value function failed.
    ///
    /// Display and `source()` forward to the underlying error, which can be
    /// recovered with `anyhow::Error::downcast_ref`.
    #[error(transparent)]
    DefaultComputation(anyhow::Error),
}

impl StoreError {
    // == Absence Check ==
    /// Returns true if this error only signals that the key is absent.
    ///
    /// Callers that fall back to their own value on absence should check this
    /// instead of treating every error as a miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::KeyNotFound)
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
