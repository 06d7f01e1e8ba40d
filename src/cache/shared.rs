//! Shared Cache Handle
//!
//! Cloneable, lock-guarded handle over a [`CacheStore`] that owns the
//! instance lifecycle: the per-instance lock, the background cleanup task,
//! and the dispose path.

use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::ConfigError;
use crate::tasks::spawn_cleanup_task;

// == Cache ==
/// A shared cache instance.
///
/// Every operation that touches the entry map or the eviction index funnels
/// through one write lock per instance; get is a write because it mutates
/// access statistics and eviction ordering. Clones share the same underlying
/// store, so a registry can hand the same instance to many callers.
///
/// Once [`Cache::dispose`] has run, the instance is permanently empty: get
/// and has miss, set is a no-op, and no operation panics.
#[derive(Debug)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Lock-guarded engine core
    store: Arc<RwLock<CacheStore<K, V>>>,
    /// Background sweep task handle, taken exactly once by dispose
    cleanup: Arc<Mutex<Option<JoinHandle<()>>>>,
    /// Set by dispose; checked before every operation
    disposed: Arc<AtomicBool>,
}

impl<K, V> Clone for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cleanup: Arc::clone(&self.cleanup),
            disposed: Arc::clone(&self.disposed),
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache instance from a configuration.
    ///
    /// Fails fast with a [`ConfigError`] on invalid values. When the
    /// configuration enables the periodic sweep (cleanup_interval_ms > 0)
    /// this spawns the cleanup task and therefore must be called from within
    /// a tokio runtime.
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        let interval = config.cleanup_interval();
        let store = Arc::new(RwLock::new(CacheStore::new(config)?));

        let cleanup = interval.map(|interval| spawn_cleanup_task(Arc::clone(&store), interval));

        Ok(Self {
            store,
            cleanup: Arc::new(Mutex::new(cleanup)),
            disposed: Arc::new(AtomicBool::new(false)),
        })
    }

    // == Set ==
    /// Inserts or overwrites a key, evicting per the configured strategy if
    /// at capacity. No-op after dispose.
    pub async fn set(&self, key: K, value: V, ttl: Option<Duration>) {
        let mut store = self.store.write().await;
        // Checked under the lock: dispose sets the flag before it clears,
        // so a racing set can never leave an entry in a disposed cache.
        if self.is_disposed() {
            return;
        }
        store.set(key, value, ttl);
    }

    // == Get ==
    /// Retrieves a clone of the value for a live key, or None.
    ///
    /// After dispose this always returns None without touching counters.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut store = self.store.write().await;
        if self.is_disposed() {
            return None;
        }
        store.get(key)
    }

    // == Has ==
    /// Reports liveness without affecting counters or eviction order.
    pub async fn has(&self, key: &K) -> bool {
        let mut store = self.store.write().await;
        if self.is_disposed() {
            return false;
        }
        store.has(key)
    }

    // == Delete ==
    /// Removes an entry by key, reporting whether anything was removed.
    pub async fn delete(&self, key: &K) -> bool {
        let mut store = self.store.write().await;
        if self.is_disposed() {
            return false;
        }
        store.delete(key)
    }

    // == Clear ==
    /// Removes all entries, keeping the lifetime hit/miss/eviction counters.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    // == Stats ==
    /// Returns a snapshot of the instance's statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Dispose ==
    /// Tears the instance down: cancels the background sweep, awaits its
    /// termination so no sweep runs after this returns, then clears all
    /// entries. Idempotent, and safe to race with in-flight operations.
    pub async fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);

        let handle = self.cleanup.lock().await.take();
        if let Some(handle) = handle {
            handle.abort();
            // A JoinError here is the expected cancellation outcome.
            let _ = handle.await;
            debug!("cleanup task cancelled");
        }

        self.store.write().await.clear();
        debug!("cache disposed");
    }

    // == Is Disposed ==
    /// Reports whether dispose has been called on this instance.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    // == Ptr Eq ==
    /// Reports whether two handles share the same underlying instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}
