//! LRU Memory Cache - An embeddable in-memory key/value cache
//!
//! Provides bounded capacity with least-recently-used eviction and optional
//! per-entry TTL expiration, evaluated lazily on access.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, CacheStats, LruList, LruMemoryCache, NodeId};
pub use config::{CacheConfig, DEFAULT_CAPACITY, MIN_CAPACITY};
pub use error::{CacheError, Result};
