//! Configuration Module
//!
//! Construction options for the cache. The struct is serde-friendly so an
//! embedding application can load it from its own configuration source.

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Smallest capacity the cache accepts.
pub const MIN_CAPACITY: usize = 3;

/// Cache construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Default TTL in seconds for entries put without an explicit duration.
    /// `0` means entries never expire by time.
    pub default_duration: u64,
}

impl CacheConfig {
    /// Creates a config with the given capacity and default duration.
    pub fn new(capacity: usize, default_duration: u64) -> Self {
        Self {
            capacity,
            default_duration,
        }
    }

    // == Validate ==
    /// Checks the options before a cache is built from them.
    ///
    /// # Errors
    /// Returns `CacheError::Configuration` when `capacity < MIN_CAPACITY`.
    pub fn validate(&self) -> Result<()> {
        if self.capacity < MIN_CAPACITY {
            return Err(CacheError::Configuration(format!(
                "capacity must be >= {}, got {}",
                MIN_CAPACITY, self.capacity
            )));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_duration: 0,
        }
    }
}
