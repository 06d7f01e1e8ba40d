//! Cachepool - A bounded in-memory cache library
//!
//! Provides a generic key-value cache with per-entry TTL expiration,
//! pluggable eviction (LRU, LFU, FIFO), usage statistics, a background
//! cleanup task, and a named-instance registry.
//!
//! # Example
//! ```
//! use cachepool::{Cache, CacheConfig, EvictionStrategy};
//!
//! # tokio_test::block_on(async {
//! let cache: Cache<String, String> = Cache::new(CacheConfig {
//!     max_size: 100,
//!     strategy: EvictionStrategy::Lru,
//!     ..CacheConfig::default()
//! })
//! .unwrap();
//!
//! cache.set("key".to_string(), "value".to_string(), None).await;
//! assert_eq!(cache.get(&"key".to_string()).await, Some("value".to_string()));
//! cache.dispose().await;
//! # });
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod registry;
pub mod tasks;

pub use cache::{Cache, CacheEntry, CacheStats, CacheStore};
pub use config::{presets, CacheConfig, EvictionStrategy};
pub use error::ConfigError;
pub use registry::CacheRegistry;
pub use tasks::spawn_cleanup_task;
