//! Error types for the cache library
//!
//! Provides configuration error handling using thiserror.
//!
//! Ordinary absence (key not found, key expired, double delete) is not an
//! error in this crate: those outcomes are returned as `Option`/`bool` from
//! the cache operations. The only fallible surface is configuration, which
//! fails fast at construction time.

use thiserror::Error;

// == Config Error Enum ==
/// Errors raised while validating a cache configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// maxSize must be a positive integer
    #[error("Invalid max_size: must be greater than 0")]
    InvalidMaxSize,

    /// Strategy name not one of lru, lfu, fifo
    #[error("Unknown eviction strategy: {0}")]
    UnknownStrategy(String),
}

// == Result Type Alias ==
/// Convenience Result type for configuration-time failures.
pub type Result<T> = std::result::Result<T, ConfigError>;
