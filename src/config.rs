//! Configuration Module
//!
//! Construction-time configuration for the cache: eviction algorithm
//! selector, capacity, and default TTL. Values can also be loaded from
//! environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Eviction Algorithm ==
/// Selector for the eviction algorithm used by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvictionAlgorithm {
    /// Least Recently Used
    Lru,
    /// Least Frequently Used (O(1) frequency buckets)
    Lfu,
}

impl fmt::Display for EvictionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvictionAlgorithm::Lru => write!(f, "LRU"),
            EvictionAlgorithm::Lfu => write!(f, "LFU"),
        }
    }
}

impl FromStr for EvictionAlgorithm {
    type Err = CacheError;

    /// Parses an algorithm selector, case-insensitively.
    ///
    /// Unknown selectors fail with `InvalidConfig`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LRU" => Ok(EvictionAlgorithm::Lru),
            "LFU" => Ok(EvictionAlgorithm::Lfu),
            other => Err(CacheError::InvalidConfig(format!(
                "Unsupported eviction algorithm: {}",
                other
            ))),
        }
    }
}

// == Cache Config ==
/// Cache configuration parameters.
///
/// All values can be loaded from environment variables with sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Eviction algorithm used when capacity is exceeded
    pub eviction: EvictionAlgorithm,
    /// Maximum number of entries the cache can hold
    pub max_items: usize,
    /// Default TTL for entries stored without an explicit TTL
    pub default_ttl: Duration,
}

impl CacheConfig {
    /// Creates a new config with the given algorithm, capacity, and default TTL.
    pub fn new(eviction: EvictionAlgorithm, max_items: usize, default_ttl: Duration) -> Self {
        Self {
            eviction,
            max_items,
            default_ttl,
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `EVICTION_ALGORITHM` - `LRU` or `LFU` (default: LRU); an unparsable
    ///   value fails with `InvalidConfig`
    /// - `MAX_ITEMS` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    pub fn from_env() -> crate::error::Result<Self> {
        let eviction = match env::var("EVICTION_ALGORITHM") {
            Ok(raw) => raw.parse()?,
            Err(_) => EvictionAlgorithm::Lru,
        };

        let max_items = env::var("MAX_ITEMS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1000);

        let default_ttl_secs: u64 = env::var("DEFAULT_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        Ok(Self {
            eviction,
            max_items,
            default_ttl: Duration::from_secs(default_ttl_secs),
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            eviction: EvictionAlgorithm::Lru,
            max_items: 1000,
            default_ttl: Duration::from_secs(300),
        }
    }
}
