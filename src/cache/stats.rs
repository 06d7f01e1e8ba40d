//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions,
//! and carries the per-snapshot fields (size, memory estimate, entry ages)
//! that the store fills in when stats are requested.

use serde::Serialize;

// == Cache Stats ==
/// Cache usage statistics.
///
/// The hit/miss/eviction counters accumulate over the lifetime of the cache
/// instance (they survive `clear()`); the remaining fields describe the
/// current contents and are computed at snapshot time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Current number of live (non-expired) entries
    pub size: usize,
    /// Configured hard cap on live entries
    pub max_size: usize,
    /// Number of get() calls that found a live entry
    pub total_hits: u64,
    /// Number of get() calls that found nothing or found an expired entry
    pub total_misses: u64,
    /// total_hits / (total_hits + total_misses); 0.0 when no accesses
    pub hit_rate: f64,
    /// Number of entries evicted to make room for inserts
    pub evictions: u64,
    /// Approximate memory footprint of live entries, in bytes
    pub memory_usage: usize,
    /// Insertion timestamp (Unix ms) of the oldest live entry, None if empty
    pub oldest_entry: Option<u64>,
    /// Insertion timestamp (Unix ms) of the newest live entry, None if empty
    pub newest_entry: Option<u64>,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_hits + self.total_misses;
        if total == 0 {
            0.0
        } else {
            self.total_hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.total_hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.total_misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.total_hits, 0);
        assert_eq!(stats.total_misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.size, 0);
        assert!(stats.oldest_entry.is_none());
        assert!(stats.newest_entry.is_none());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed_is_exact() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_eviction() {
        let mut stats = CacheStats::new();
        stats.record_eviction();
        stats.record_eviction();
        assert_eq!(stats.evictions, 2);
    }
}
