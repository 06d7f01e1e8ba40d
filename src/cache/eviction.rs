//! Eviction Index Module
//!
//! Per-strategy ordering index consulted by the cache store on every insert
//! and access. The index is a tagged variant so the store's get/set/evict
//! logic stays strategy-agnostic; each variant owns its own ordering
//! structure.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::config::EvictionStrategy;

// == Eviction Index ==
/// Strategy-specific bookkeeping for choosing the next eviction victim.
///
/// Orderings (front = newest in every variant, back = oldest):
/// - `Lru`: recency deque; the back is the least recently used victim.
/// - `Fifo`: insertion-order deque; the back is the earliest inserted victim.
/// - `Lfu`: per-key hit counter plus an insertion-order deque; the victim is
///   the lowest counter, ties broken by oldest insertion (scanned oldest
///   first).
#[derive(Debug)]
pub enum EvictionIndex<K> {
    Lru { order: VecDeque<K> },
    Fifo { order: VecDeque<K> },
    Lfu { frequencies: HashMap<K, u64>, order: VecDeque<K> },
}

impl<K> EvictionIndex<K>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty index for the given strategy.
    pub fn new(strategy: EvictionStrategy) -> Self {
        match strategy {
            EvictionStrategy::Lru => Self::Lru { order: VecDeque::new() },
            EvictionStrategy::Fifo => Self::Fifo { order: VecDeque::new() },
            EvictionStrategy::Lfu => Self::Lfu {
                frequencies: HashMap::new(),
                order: VecDeque::new(),
            },
        }
    }

    // == Strategy ==
    /// Reports which strategy this index implements.
    pub fn strategy(&self) -> EvictionStrategy {
        match self {
            Self::Lru { .. } => EvictionStrategy::Lru,
            Self::Fifo { .. } => EvictionStrategy::Fifo,
            Self::Lfu { .. } => EvictionStrategy::Lfu,
        }
    }

    // == On Insert ==
    /// Registers a set() against the index.
    ///
    /// LRU treats any set as a use and moves the key to the MRU end. FIFO
    /// and LFU keep an overwritten key's insertion-order position; LFU also
    /// keeps its frequency counter (hits, not sets, drive frequency).
    pub fn on_insert(&mut self, key: &K, overwrite: bool) {
        match self {
            Self::Lru { order } => {
                order.retain(|k| k != key);
                order.push_front(key.clone());
            }
            Self::Fifo { order } => {
                if !overwrite {
                    order.push_front(key.clone());
                }
            }
            Self::Lfu { frequencies, order } => {
                if !overwrite {
                    frequencies.insert(key.clone(), 0);
                    order.push_front(key.clone());
                }
            }
        }
    }

    // == On Access ==
    /// Registers a get-hit against the index.
    ///
    /// LRU moves the key to the MRU end; LFU bumps its counter; FIFO ignores
    /// access entirely.
    pub fn on_access(&mut self, key: &K) {
        match self {
            Self::Lru { order } => {
                order.retain(|k| k != key);
                order.push_front(key.clone());
            }
            Self::Fifo { .. } => {}
            Self::Lfu { frequencies, .. } => {
                if let Some(count) = frequencies.get_mut(key) {
                    *count += 1;
                }
            }
        }
    }

    // == Evict Candidate ==
    /// Removes and returns the key the strategy picks for eviction.
    ///
    /// Returns None if the index is empty.
    pub fn evict_candidate(&mut self) -> Option<K> {
        match self {
            Self::Lru { order } => order.pop_back(),
            Self::Fifo { order } => order.pop_back(),
            Self::Lfu { frequencies, order } => {
                // Lowest frequency wins; scan back-to-front (oldest first)
                // so ties resolve to the oldest insertion.
                let victim = order
                    .iter()
                    .rev()
                    .min_by_key(|k| frequencies.get(*k).copied().unwrap_or(0))
                    .cloned()?;
                frequencies.remove(&victim);
                order.retain(|k| k != &victim);
                Some(victim)
            }
        }
    }

    // == Remove ==
    /// Drops a key from the index (delete, expiry, or lazy cleanup).
    pub fn remove(&mut self, key: &K) {
        match self {
            Self::Lru { order } | Self::Fifo { order } => {
                order.retain(|k| k != key);
            }
            Self::Lfu { frequencies, order } => {
                frequencies.remove(key);
                order.retain(|k| k != key);
            }
        }
    }

    // == Clear ==
    /// Resets the index to empty.
    pub fn clear(&mut self) {
        match self {
            Self::Lru { order } | Self::Fifo { order } => order.clear(),
            Self::Lfu { frequencies, order } => {
                frequencies.clear();
                order.clear();
            }
        }
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        match self {
            Self::Lru { order } | Self::Fifo { order } => order.len(),
            Self::Lfu { order, .. } => order.len(),
        }
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
