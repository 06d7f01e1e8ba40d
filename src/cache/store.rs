//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with a strategy-driven
//! eviction index and TTL expiration. Synchronous core; see
//! [`crate::cache::Cache`] for the shared, lock-guarded handle.

use std::collections::HashMap;
use std::hash::Hash;
use std::mem;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, EvictionIndex};
use crate::config::CacheConfig;
use crate::error::ConfigError;

// == Cache Store ==
/// Bounded key-value store with pluggable eviction and per-entry TTL.
///
/// Expired entries are logically absent the moment their TTL elapses: get
/// and has remove them lazily, and [`CacheStore::cleanup_expired`] sweeps
/// them proactively.
#[derive(Debug)]
pub struct CacheStore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Strategy-specific eviction ordering
    index: EvictionIndex<K>,
    /// Lifetime hit/miss/eviction counters
    stats: CacheStats,
    /// Validated configuration
    config: CacheConfig,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore from a validated configuration.
    ///
    /// Fails fast with a [`ConfigError`] on invalid values (max_size of 0);
    /// no other operation on the store returns an error.
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            entries: HashMap::new(),
            index: EvictionIndex::new(config.strategy),
            stats: CacheStats::new(),
            config,
        })
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// If the key already exists, the value is overwritten and the TTL is
    /// reset (explicit `ttl`, else the configured default, else never
    /// expires). If inserting a new key would exceed max_size, exactly one
    /// entry chosen by the eviction strategy is removed first.
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite {
            self.evict_to_fit();
        }

        let effective_ttl = ttl.or_else(|| self.config.default_ttl());
        let entry = CacheEntry::new(value, effective_ttl);
        self.entries.insert(key.clone(), entry);
        self.index.on_insert(&key, is_overwrite);

        debug_assert_eq!(
            self.entries.len(),
            self.index.len(),
            "entry map and eviction index out of sync after set"
        );
    }

    // == Get ==
    /// Retrieves a clone of the value for a live key, or None.
    ///
    /// A hit refreshes the entry's access metadata and notifies the eviction
    /// index. A miss (absent or expired) increments the miss counter; an
    /// expired entry found here is removed on the spot.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if self.remove_if_expired(key) {
            self.stats.record_miss();
            return None;
        }

        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch();
                let value = entry.value.clone();
                self.stats.record_hit();
                self.index.on_access(key);
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Has ==
    /// Reports whether a key is live (present and not expired).
    ///
    /// Does not count as a hit or miss and does not change eviction order,
    /// but removes an entry found expired, same as get.
    pub fn has(&mut self, key: &K) -> bool {
        if self.remove_if_expired(key) {
            return false;
        }
        self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes an entry (live or expired) by key.
    ///
    /// Returns whether anything was removed; deleting an absent key is not
    /// an error.
    pub fn delete(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_some() {
            self.index.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes all entries and resets the eviction index.
    ///
    /// The hit/miss/eviction counters are lifetime totals and are preserved
    /// across clear.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.index.remove(&key);
        }

        count
    }

    // == Stats ==
    /// Returns a snapshot of current cache statistics.
    ///
    /// `size` counts live entries only; `memory_usage` is an approximate
    /// byte estimate over live entries; `oldest_entry`/`newest_entry` are
    /// the insertion timestamps of the oldest/newest live entries.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.max_size = self.config.max_size;

        let mut size = 0usize;
        let mut oldest: Option<u64> = None;
        let mut newest: Option<u64> = None;
        for entry in self.entries.values() {
            if entry.is_expired() {
                continue;
            }
            size += 1;
            oldest = Some(oldest.map_or(entry.created_at, |t| t.min(entry.created_at)));
            newest = Some(newest.map_or(entry.created_at, |t| t.max(entry.created_at)));
        }

        stats.size = size;
        stats.memory_usage = size * (mem::size_of::<K>() + mem::size_of::<CacheEntry<V>>());
        stats.oldest_entry = oldest;
        stats.newest_entry = newest;
        stats.hit_rate = stats.hit_rate();
        stats
    }

    // == Config ==
    /// Returns the configuration this store was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Length ==
    /// Returns the number of physically present entries, expired included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internal: Lazy Expiry ==
    /// Removes the entry for `key` if it is present and expired.
    ///
    /// Returns true when an expired entry was removed.
    fn remove_if_expired(&mut self, key: &K) -> bool {
        let expired = matches!(self.entries.get(key), Some(entry) if entry.is_expired());
        if expired {
            self.entries.remove(key);
            self.index.remove(key);
        }
        expired
    }

    // == Internal: Eviction ==
    /// Evicts entries until a new key can be inserted without exceeding
    /// max_size. In normal operation this removes at most one entry.
    ///
    /// A disagreement between the entry map and the eviction index is a
    /// programming error: asserted in debug builds, self-healed here by
    /// dropping the stale side so the size bound still holds.
    fn evict_to_fit(&mut self) {
        while self.entries.len() >= self.config.max_size {
            match self.index.evict_candidate() {
                Some(victim) => {
                    if self.entries.remove(&victim).is_some() {
                        self.stats.record_eviction();
                        debug!(strategy = ?self.index.strategy(), "evicted entry at capacity");
                    } else {
                        debug_assert!(false, "eviction index referenced a missing entry");
                        warn!("eviction index referenced a missing entry; dropped stale index key");
                    }
                }
                None => {
                    debug_assert!(false, "entry map at capacity but eviction index empty");
                    warn!("eviction index empty at capacity; removing arbitrary entry");
                    match self.entries.keys().next().cloned() {
                        Some(key) => {
                            self.entries.remove(&key);
                            self.stats.record_eviction();
                        }
                        None => break,
                    }
                }
            }
        }
    }
}
