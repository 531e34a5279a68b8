//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with an LRU list and lazy TTL
//! expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use tracing::{debug, trace};

use crate::cache::{current_timestamp_ms, CacheEntry, CacheStats, Keys, LruList};
use crate::config::CacheConfig;
use crate::error::Result;

// == LRU Memory Cache ==
/// Bounded key/value cache with LRU eviction and per-entry TTL.
///
/// Every key in `entries` has exactly one node in `lru` and the other way
/// around. Expired entries are only removed when `get` finds them, when they
/// fall off the tail, or on `delete`/`clear`; there is no background sweep.
///
/// The cache is not synchronized. Wrap it in a mutex to share it across
/// threads.
pub struct LruMemoryCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Recency order of the stored keys
    lru: LruList<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Default TTL in seconds for entries without explicit TTL
    default_duration: u64,
}

impl<K, V> fmt::Debug for LruMemoryCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruMemoryCache")
            .field("capacity", &self.capacity)
            .field("default_duration", &self.default_duration)
            .field("len", &self.entries.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<K, V> LruMemoryCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new cache from the given options.
    ///
    /// # Errors
    /// Returns `CacheError::Configuration` if `config.capacity` is below
    /// `MIN_CAPACITY`.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            capacity = config.capacity,
            default_duration = config.default_duration,
            "Cache created"
        );
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::with_capacity(config.capacity),
            lru: LruList::with_capacity(config.capacity),
            stats: CacheStats::new(),
            capacity: config.capacity,
            default_duration: config.default_duration,
        }
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// `duration` is the TTL in seconds for this entry and overrides the
    /// default duration; `None` uses the default and `Some(0)` means the
    /// entry never expires. Storing an existing key replaces its value and
    /// expiry and makes it the most recently used without changing the size.
    /// If the cache then exceeds its capacity, the least recently used entry
    /// is evicted, whether or not it has expired.
    pub fn put(&mut self, key: K, value: V, duration: Option<u64>) {
        let duration = duration.unwrap_or(self.default_duration);
        let now = current_timestamp_ms();

        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.refresh(value, duration, now);
                self.lru.move_to_front(entry.node);
                trace!(duration, "Updated existing entry");
            }
            None => {
                let node = self.lru.push_front(key.clone());
                self.entries
                    .insert(key, CacheEntry::new(value, duration, now, node));
                trace!(duration, len = self.entries.len(), "Inserted new entry");
            }
        }

        self.evict_overflow();
    }

    // == Get ==
    /// Retrieves a value by key, marking it as most recently used.
    ///
    /// An expired entry is removed on the spot and reported as absent.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = current_timestamp_ms();
        let (node, valid) = match self.entries.get(key) {
            Some(entry) => (entry.node, entry.is_valid_at(now)),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if !valid {
            self.remove_entry(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(len = self.entries.len(), "Removed expired entry on access");
            return None;
        }

        self.lru.move_to_front(node);
        self.stats.record_hit();
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Has ==
    /// Checks whether a key is present and not expired.
    ///
    /// Does not change recency order and leaves expired entries in place.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = current_timestamp_ms();
        self.entries
            .get(key)
            .is_some_and(|entry| entry.is_valid_at(now))
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns whether an entry was removed; deleting an absent key is a
    /// no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.remove_entry(key).is_some();
        if removed {
            trace!(len = self.entries.len(), "Deleted entry");
        }
        removed
    }

    // == Clear ==
    /// Removes every entry. Capacity and default duration are kept.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        debug!(removed, "Cache cleared");
    }

    // == Keys ==
    /// Iterates keys from most to least recently used.
    ///
    /// Intended for debugging; includes expired entries that have not been
    /// removed yet and does not touch recency order.
    pub fn keys(&self) -> Keys<'_, K> {
        self.lru.iter()
    }

    // == Inspect ==
    /// Renders the keys from most to least recently used as a JSON array.
    ///
    /// # Errors
    /// Returns `CacheError::Serialization` if a key fails to serialize.
    pub fn inspect(&self) -> Result<String>
    where
        K: Serialize,
    {
        let keys: Vec<&K> = self.keys().collect();
        Ok(serde_json::to_string(&keys)?)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// TTL in seconds applied when `put` gets no duration.
    pub fn default_duration(&self) -> u64 {
        self.default_duration
    }

    /// Drops the entry and its node together.
    fn remove_entry<Q>(&mut self, key: &Q) -> Option<CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.entries.remove(key)?;
        self.lru.remove(entry.node);
        Some(entry)
    }

    /// Evicts from the tail until the capacity bound holds again.
    fn evict_overflow(&mut self) {
        while self.entries.len() > self.capacity {
            let Some(evicted) = self.lru.pop_back() else {
                break;
            };
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            debug!(capacity = self.capacity, "Evicted least recently used entry");
        }
    }
}

impl<K, V> Default for LruMemoryCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::from_valid_config(CacheConfig::default())
    }
}
