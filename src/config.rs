//! Configuration Module
//!
//! Cache configuration with validation, documented defaults, and named
//! presets. All fields carry serde defaults so that a partial configuration
//! object (e.g. a preset supplied by an external configuration store)
//! merges over the documented defaults when deserialized.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// == Eviction Strategy ==
/// Eviction policy consulted by the engine on every insert and access.
///
/// Fixed for the lifetime of a cache instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionStrategy {
    /// Least recently used: every hit and set moves the key to the
    /// most-recently-used end; eviction removes the other end.
    #[default]
    Lru,
    /// Least frequently used: per-key counter incremented on every hit;
    /// eviction removes the lowest counter, ties broken by oldest insertion.
    Lfu,
    /// First in, first out: pure insertion order; access and overwrite
    /// never change position.
    Fifo,
}

impl FromStr for EvictionStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lru" => Ok(Self::Lru),
            "lfu" => Ok(Self::Lfu),
            "fifo" => Ok(Self::Fifo),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

// == Cache Config ==
/// Cache instance configuration.
///
/// Validated at construction via [`CacheConfig::validate`]; an invalid
/// configuration fails the construction call rather than surfacing later.
///
/// # Defaults
/// - `max_size`: 1000 entries
/// - `default_ttl_ms`: 0 (entries never expire unless a per-set TTL is given)
/// - `cleanup_interval_ms`: 0 (no periodic sweep; expiration is purely lazy)
/// - `strategy`: LRU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Hard cap on live entries; must be greater than 0
    pub max_size: usize,
    /// Default TTL in milliseconds; 0 means entries never expire by default
    pub default_ttl_ms: u64,
    /// Periodic sweep interval in milliseconds; 0 disables the sweep
    pub cleanup_interval_ms: u64,
    /// Eviction strategy: lru, lfu, or fifo
    pub strategy: EvictionStrategy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 1000,
            default_ttl_ms: 0,
            cleanup_interval_ms: 0,
            strategy: EvictionStrategy::Lru,
        }
    }
}

impl CacheConfig {
    // == Validate ==
    /// Checks the configuration, failing fast on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size == 0 {
            return Err(ConfigError::InvalidMaxSize);
        }
        Ok(())
    }

    // == Default TTL ==
    /// Returns the default TTL as a duration, or None when entries never
    /// expire by default.
    pub fn default_ttl(&self) -> Option<Duration> {
        match self.default_ttl_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    // == Cleanup Interval ==
    /// Returns the sweep interval as a duration, or None when the periodic
    /// sweep is disabled.
    pub fn cleanup_interval(&self) -> Option<Duration> {
        match self.cleanup_interval_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

// == Presets ==
/// Named default configurations for common cache uses.
///
/// A preset is a plain [`CacheConfig`] value; callers pass it through
/// unchanged to `CacheRegistry::create(name, Some(preset))`.
pub mod presets {
    use super::{CacheConfig, EvictionStrategy};

    /// Preset for caching network scan results.
    ///
    /// Scan results go stale quickly and arrive in bounded bursts: at most
    /// 100 entries, a 5 minute TTL, a sweep every 60 seconds, LRU eviction.
    pub fn network_scan() -> CacheConfig {
        CacheConfig {
            max_size: 100,
            default_ttl_ms: 5 * 60 * 1000,
            cleanup_interval_ms: 60 * 1000,
            strategy: EvictionStrategy::Lru,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_size, 1000);
        assert_eq!(config.default_ttl_ms, 0);
        assert_eq!(config.cleanup_interval_ms, 0);
        assert_eq!(config.strategy, EvictionStrategy::Lru);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_zero_max_size_rejected() {
        let config = CacheConfig {
            max_size: 0,
            ..CacheConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxSize));
    }

    #[test]
    fn test_config_zero_durations_mean_disabled() {
        let config = CacheConfig::default();
        assert!(config.default_ttl().is_none());
        assert!(config.cleanup_interval().is_none());
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("lru".parse::<EvictionStrategy>(), Ok(EvictionStrategy::Lru));
        assert_eq!("lfu".parse::<EvictionStrategy>(), Ok(EvictionStrategy::Lfu));
        assert_eq!("fifo".parse::<EvictionStrategy>(), Ok(EvictionStrategy::Fifo));
        assert_eq!(
            "mru".parse::<EvictionStrategy>(),
            Err(ConfigError::UnknownStrategy("mru".to_string()))
        );
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        // External presets arrive as partial config objects; unspecified
        // fields fall back to the documented defaults.
        let config: CacheConfig =
            serde_json::from_str(r#"{"maxSize": 50, "strategy": "lfu"}"#).unwrap();
        assert_eq!(config.max_size, 50);
        assert_eq!(config.strategy, EvictionStrategy::Lfu);
        assert_eq!(config.default_ttl_ms, 0);
        assert_eq!(config.cleanup_interval_ms, 0);
    }

    #[test]
    fn test_unknown_strategy_in_json_rejected() {
        let result = serde_json::from_str::<CacheConfig>(r#"{"strategy": "random"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_network_scan_preset() {
        let config = presets::network_scan();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_size, 100);
        assert_eq!(config.default_ttl_ms, 300_000);
        assert_eq!(config.cleanup_interval_ms, 60_000);
        assert_eq!(config.strategy, EvictionStrategy::Lru);
    }
}
