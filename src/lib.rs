//! Cachette - An embeddable in-memory key-value cache
//!
//! Bounds memory with a pluggable eviction policy (LRU or LFU) and
//! additionally expires entries after a time-to-live (TTL).

pub mod cache;
pub mod config;
pub mod error;

pub use cache::CacheStore;
pub use config::{CacheConfig, EvictionAlgorithm};
pub use error::{CacheError, Result};
