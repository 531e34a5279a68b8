//! Cache Entry Module
//!
//! Defines the record stored per key: the value, its expiration instant and
//! the handle of its node in the recency list.

use chrono::Utc;

use crate::cache::NodeId;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
    /// Position of this entry in the recency list
    pub node: NodeId,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry that expires `duration_secs` after `now_ms`.
    ///
    /// A duration of `0` means the entry never expires by time.
    pub fn new(value: V, duration_secs: u64, now_ms: u64, node: NodeId) -> Self {
        Self {
            value,
            expires_at: expiry_from(now_ms, duration_secs),
            node,
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the expiration window.
    pub fn refresh(&mut self, value: V, duration_secs: u64, now_ms: u64) {
        self.value = value;
        self.expires_at = expiry_from(now_ms, duration_secs);
    }

    // == Is Valid ==
    /// Checks whether the entry is still live at `now_ms`.
    ///
    /// Boundary condition: the entry is already expired at the exact
    /// expiration instant (`now_ms == expires_at`).
    pub fn is_valid_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms < expires,
            None => true,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired against the system clock.
    #[allow(dead_code)]
    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(current_timestamp_ms())
    }
}

fn expiry_from(now_ms: u64, duration_secs: u64) -> Option<u64> {
    if duration_secs == 0 {
        None
    } else {
        Some(now_ms.saturating_add(duration_secs.saturating_mul(1000)))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// Clocks set before the epoch read as `0`.
pub fn current_timestamp_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
