//! Configuration Module
//!
//! Handles loading store settings from environment variables.

use std::env;

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Total size the store may hold (entry count with the unit size function)
    pub capacity: usize,
    /// Whether hit/miss/eviction counters are maintained
    pub track_stats: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_CAPACITY` - Store capacity (default: 1000)
    /// - `STORE_TRACK_STATS` - Maintain statistics, `true`/`false` (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env::var("STORE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),
            track_stats: env::var("STORE_TRACK_STATS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.track_stats),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            track_stats: true,
        }
    }
}
