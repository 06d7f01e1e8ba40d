//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task wakes on a fixed interval, acquires the store's write lock, and
/// removes every currently expired entry. A single task serves a store, so
/// sweeps never overlap; missed ticks are delayed rather than bursted, so a
/// slow sweep is never immediately followed by another. Nothing in the sweep
/// can terminate the process: a tick that finds nothing to do just logs and
/// waits for the next one.
///
/// Must be called from within a tokio runtime. The returned handle is owned
/// by the cache instance and aborted in its dispose path.
///
/// # Arguments
/// * `store` - Shared reference to the cache store
/// * `interval` - Time between sweep runs; must be non-zero
pub fn spawn_cleanup_task<K, V>(
    store: Arc<RwLock<CacheStore<K, V>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting TTL cleanup task");

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the first
        // sweep happens one full interval after spawn.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = {
                let mut store = store.write().await;
                store.cleanup_expired()
            };

            if removed > 0 {
                info!(removed, "TTL cleanup: removed expired entries");
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
