//! Cache Store Module
//!
//! The TTL-aware cache façade. Composes one eviction policy (chosen at
//! construction) with expiration semantics: every value is wrapped in an
//! envelope carrying its expiration and last-access timestamps, and expiry
//! is checked lazily at read time.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, EvictionPolicy, LfuPolicy, LruPolicy, MAX_KEY_LENGTH};
use crate::config::{CacheConfig, EvictionAlgorithm};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// TTL cache over a pluggable eviction policy.
///
/// The store never inspects policy internals; it drives the policy purely
/// through the [`EvictionPolicy`] contract, so swapping algorithms changes
/// nothing but the eviction order. The store itself holds no lock; each
/// policy call is internally atomic.
pub struct CacheStore<V> {
    /// Eviction policy, dispatched once at construction
    policy: Box<dyn EvictionPolicy<Arc<CacheEntry<V>>>>,
    /// Default TTL for entries stored without an explicit TTL
    default_ttl: Duration,
}

impl<V> CacheStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a new CacheStore from a validated configuration.
    ///
    /// Fails with `InvalidConfig` if the capacity is zero. The eviction
    /// algorithm enum is matched exactly once here; no runtime type
    /// switching happens afterwards.
    pub fn new(config: CacheConfig) -> Result<Self> {
        if config.max_items == 0 {
            return Err(CacheError::InvalidConfig(
                "MaxItems must be greater than 0".to_string(),
            ));
        }

        let policy: Box<dyn EvictionPolicy<Arc<CacheEntry<V>>>> = match config.eviction {
            EvictionAlgorithm::Lru => Box::new(LruPolicy::new(config.max_items)),
            EvictionAlgorithm::Lfu => Box::new(LfuPolicy::new(config.max_items)),
        };

        debug!(
            algorithm = %config.eviction,
            max_items = config.max_items,
            "cache store initialized"
        );

        Ok(Self {
            policy,
            default_ttl: config.default_ttl,
        })
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL override.
    ///
    /// Insert and update are not distinguished at this layer; both go
    /// through the policy's `put`, so an update refreshes the entry's TTL.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses the cache-wide default if None)
    pub fn set(&self, key: &str, value: V, ttl: Option<Duration>) -> Result<()> {
        validate_key(key)?;

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.policy.put(key, Arc::new(entry));
        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A present-but-expired entry is treated as logically absent: it is
    /// removed through the policy and the call fails with `Expired`. A
    /// subsequent lookup of the same key fails with `NotFound`.
    pub fn get(&self, key: &str) -> Result<V> {
        validate_key(key)?;

        let entry = self
            .policy
            .get(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        if entry.is_expired() {
            self.policy.remove(key);
            debug!(key = %key, "removed expired entry on read");
            return Err(CacheError::Expired(key.to_string()));
        }

        entry.touch();
        Ok(entry.value().clone())
    }

    // == Delete ==
    /// Removes an entry by key.
    pub fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;

        if self.policy.remove(key) {
            Ok(())
        } else {
            Err(CacheError::NotFound(key.to_string()))
        }
    }

    // == Clear ==
    /// Removes all entries. Cannot fail.
    pub fn clear(&self) {
        self.policy.clear();
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.policy.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.policy.is_empty()
    }
}

/// Rejects empty and oversized keys with `InvalidArgument`.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidArgument(
            "key cannot be empty".to_string(),
        ));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidArgument(format!(
            "key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}
