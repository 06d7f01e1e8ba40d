//! Cache Module
//!
//! Provides bounded in-memory caching with TTL expiration and pluggable
//! eviction (LRU, LFU, FIFO).

mod entry;
mod eviction;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use eviction::EvictionIndex;
pub use shared::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
