//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use lru::{Keys, LruList, NodeId};
pub use stats::CacheStats;
pub use store::LruMemoryCache;
