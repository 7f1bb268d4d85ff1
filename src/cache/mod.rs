//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and pluggable eviction
//! policies (LRU and LFU).

mod entry;
mod lfu;
mod lru;
mod policy;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use policy::EvictionPolicy;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
