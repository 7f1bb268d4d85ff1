//! Eviction Policy Contract
//!
//! The abstraction the cache façade composes with. Concrete algorithms
//! (LRU, LFU) implement this trait and guard their own internal state, so
//! every method takes `&self` and is safe to call from multiple threads.

// == Eviction Policy Trait ==
/// Contract implemented by every eviction algorithm.
///
/// `T` is the stored payload, opaque to the policy. Implementations own a
/// single mutual-exclusion region protecting all internal indexes; each call
/// acquires it for the call's duration, so individual operations are atomic.
pub trait EvictionPolicy<T>: Send + Sync {
    /// Inserts or updates an entry.
    ///
    /// Inserting a new key at capacity evicts exactly one existing entry
    /// first, chosen by the algorithm.
    fn put(&self, key: &str, value: T);

    /// Looks up an entry, updating the algorithm's recency/frequency
    /// bookkeeping on a hit. Returns `None` on a miss, with no side effect.
    fn get(&self, key: &str) -> Option<T>;

    /// Removes an entry if present, reporting whether anything was removed.
    fn remove(&self, key: &str) -> bool;

    /// Empties all state back to its construction-time shape.
    fn clear(&self);

    /// Current number of stored entries.
    fn len(&self) -> usize;

    /// Returns true if the policy holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
