//! Cache Registry Module
//!
//! Named-instance factory: maps a name to a lazily created, shared
//! [`Cache`] instance. The registry is an explicitly constructed object
//! rather than process-global state, so tests (and embedders) can isolate
//! instances per run and tear everything down at shutdown with
//! [`CacheRegistry::dispose_all`].

use std::collections::HashMap;
use std::hash::Hash;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{Cache, CacheStats};
use crate::config::CacheConfig;
use crate::error::ConfigError;

// == Cache Registry ==
/// Registry of named, shared cache instances.
///
/// All instances in one registry share the key and value types; every caller
/// that asks for the same name receives a handle to the same instance.
#[derive(Debug)]
pub struct CacheRegistry<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Name -> shared instance
    caches: RwLock<HashMap<String, Cache<K, V>>>,
    /// Configuration used when create() receives none
    defaults: CacheConfig,
}

impl<K, V> Default for CacheRegistry<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CacheRegistry<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructors ==
    /// Creates an empty registry using [`CacheConfig::default`] for caches
    /// created without an explicit configuration.
    pub fn new() -> Self {
        Self::with_defaults(CacheConfig::default())
    }

    /// Creates an empty registry with the given default configuration.
    pub fn with_defaults(defaults: CacheConfig) -> Self {
        Self {
            caches: RwLock::new(HashMap::new()),
            defaults,
        }
    }
}

impl<K, V> CacheRegistry<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Create ==
    /// Returns the instance registered under `name`, creating it if absent.
    ///
    /// When an instance already exists, `config` is ignored and the existing
    /// instance is returned. Otherwise a new cache is built from `config`
    /// (or the registry defaults) and registered. Get-or-create holds the
    /// registry write lock, so concurrent creates for one name never produce
    /// two live instances.
    pub async fn create(
        &self,
        name: &str,
        config: Option<CacheConfig>,
    ) -> Result<Cache<K, V>, ConfigError> {
        let mut caches = self.caches.write().await;

        if let Some(existing) = caches.get(name) {
            return Ok(existing.clone());
        }

        let cache = Cache::new(config.unwrap_or_else(|| self.defaults.clone()))?;
        caches.insert(name.to_string(), cache.clone());
        info!(name, "registered cache instance");
        Ok(cache)
    }

    // == Get ==
    /// Returns the instance registered under `name` without creating one.
    pub async fn get(&self, name: &str) -> Option<Cache<K, V>> {
        self.caches.read().await.get(name).cloned()
    }

    // == Delete ==
    /// Disposes and removes the instance registered under `name`.
    ///
    /// Returns whether an instance was removed.
    pub async fn delete(&self, name: &str) -> bool {
        let removed = self.caches.write().await.remove(name);
        match removed {
            Some(cache) => {
                cache.dispose().await;
                debug!(name, "disposed and removed cache instance");
                true
            }
            None => false,
        }
    }

    // == Dispose All ==
    /// Disposes and removes every registered instance.
    ///
    /// This is the registry's shutdown teardown point.
    pub async fn dispose_all(&self) {
        let drained: Vec<Cache<K, V>> = {
            let mut caches = self.caches.write().await;
            caches.drain().map(|(_, cache)| cache).collect()
        };

        let count = drained.len();
        for cache in drained {
            cache.dispose().await;
        }
        info!(count, "disposed all cache instances");
    }

    // == Clear All ==
    /// Clears every registered instance without removing it from the
    /// registry.
    pub async fn clear_all(&self) {
        let caches = self.caches.read().await;
        for cache in caches.values() {
            cache.clear().await;
        }
    }

    // == All Stats ==
    /// Returns a snapshot of every registered instance's statistics.
    pub async fn all_stats(&self) -> HashMap<String, CacheStats> {
        let caches = self.caches.read().await;
        let mut stats = HashMap::with_capacity(caches.len());
        for (name, cache) in caches.iter() {
            stats.insert(name.clone(), cache.stats().await);
        }
        stats
    }

    // == Length ==
    /// Returns the number of registered instances.
    pub async fn len(&self) -> usize {
        self.caches.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.caches.read().await.is_empty()
    }

    // == Names ==
    /// Returns the names of all registered instances.
    pub async fn names(&self) -> Vec<String> {
        self.caches.read().await.keys().cloned().collect()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;

    fn registry() -> CacheRegistry<String, String> {
        CacheRegistry::new()
    }

    #[tokio::test]
    async fn test_registry_create_returns_same_instance() {
        let registry = registry();

        let first = registry.create("x", None).await.unwrap();
        let second = registry.create("x", None).await.unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_registry_create_ignores_config_for_existing() {
        let registry = registry();

        let first = registry.create("x", None).await.unwrap();
        let second = registry
            .create("x", Some(presets::network_scan()))
            .await
            .unwrap();

        assert!(first.ptr_eq(&second));
        // Still the default shape, not the preset's
        assert_eq!(second.stats().await.max_size, 1000);
    }

    #[tokio::test]
    async fn test_registry_distinct_names_distinct_instances() {
        let registry = registry();

        let x = registry.create("x", None).await.unwrap();
        let y = registry.create("y", None).await.unwrap();

        assert!(!x.ptr_eq(&y));

        x.set("key".to_string(), "value".to_string(), None).await;
        assert_eq!(y.get(&"key".to_string()).await, None);
    }

    #[tokio::test]
    async fn test_registry_get_does_not_create() {
        let registry = registry();

        assert!(registry.get("missing").await.is_none());
        assert!(registry.is_empty().await);

        registry.create("present", None).await.unwrap();
        assert!(registry.get("present").await.is_some());
    }

    #[tokio::test]
    async fn test_registry_create_propagates_config_error() {
        let registry = registry();

        let result = registry
            .create(
                "bad",
                Some(CacheConfig {
                    max_size: 0,
                    ..CacheConfig::default()
                }),
            )
            .await;

        assert_eq!(result.err(), Some(ConfigError::InvalidMaxSize));
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_registry_delete() {
        let registry = registry();

        let cache = registry.create("x", None).await.unwrap();

        assert!(registry.delete("x").await);
        assert!(!registry.delete("x").await);
        assert!(cache.is_disposed());
        assert!(registry.get("x").await.is_none());
    }

    #[tokio::test]
    async fn test_registry_dispose_all() {
        let registry = registry();

        let x = registry.create("x", None).await.unwrap();
        let y = registry.create("y", None).await.unwrap();

        registry.dispose_all().await;

        assert!(registry.is_empty().await);
        assert!(x.is_disposed());
        assert!(y.is_disposed());
    }

    #[tokio::test]
    async fn test_registry_clear_all_keeps_registrations() {
        let registry = registry();

        let x = registry.create("x", None).await.unwrap();
        x.set("key".to_string(), "value".to_string(), None).await;

        registry.clear_all().await;

        assert_eq!(registry.len().await, 1);
        let x_again = registry.get("x").await.unwrap();
        assert!(x.ptr_eq(&x_again));
        assert_eq!(x_again.stats().await.size, 0);
    }

    #[tokio::test]
    async fn test_registry_all_stats() {
        let registry = registry();

        let x = registry.create("x", None).await.unwrap();
        let y = registry.create("y", None).await.unwrap();

        x.set("a".to_string(), "1".to_string(), None).await;
        x.get(&"a".to_string()).await.unwrap();
        y.set("b".to_string(), "2".to_string(), None).await;

        let stats = registry.all_stats().await;
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["x"].size, 1);
        assert_eq!(stats["x"].total_hits, 1);
        assert_eq!(stats["y"].size, 1);
        assert_eq!(stats["y"].total_hits, 0);
    }

    #[tokio::test]
    async fn test_registry_with_defaults() {
        let registry: CacheRegistry<String, String> =
            CacheRegistry::with_defaults(presets::network_scan());

        let cache = registry.create("scans", None).await.unwrap();
        assert_eq!(cache.stats().await.max_size, 100);

        registry.dispose_all().await;
    }
}
