//! Cache Entry Module
//!
//! Defines the envelope wrapped around each cached value, carrying its
//! expiration and last-access timestamps.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Envelope around a cached value with TTL metadata.
///
/// The envelope is shared behind `Arc` between the façade and the policy,
/// so the last-access timestamp is atomic and can be touched through a
/// shared reference.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored value
    value: V,
    /// Expiration timestamp (Unix milliseconds)
    expires_at: u64,
    /// Timestamp of the most recent successful read (Unix milliseconds)
    last_access: AtomicU64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = current_timestamp_ms();

        Self {
            value,
            expires_at: now + ttl.as_millis() as u64,
            last_access: AtomicU64::new(now),
        }
    }

    /// Returns a reference to the stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the expiration timestamp (Unix milliseconds).
    pub fn expires_at(&self) -> u64 {
        self.expires_at
    }

    /// Returns the last-access timestamp (Unix milliseconds).
    pub fn last_access_ms(&self) -> u64 {
        self.last_access.load(Ordering::Relaxed)
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// strictly past the expiration time.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() > self.expires_at
    }

    // == Touch ==
    /// Records a successful read by updating the last-access timestamp.
    pub fn touch(&self) {
        self.last_access
            .store(current_timestamp_ms(), Ordering::Relaxed);
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or 0 if the entry has expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value".to_string(), Duration::from_secs(60));

        assert_eq!(entry.value(), "test_value");
        assert!(!entry.is_expired());
        assert!(entry.expires_at() > current_timestamp_ms());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("test_value".to_string(), Duration::from_millis(50));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_ttl_remaining_ms() {
        let entry = CacheEntry::new("test_value".to_string(), Duration::from_secs(10));

        let remaining = entry.ttl_remaining_ms();
        assert!(remaining <= 10_000);
        assert!(remaining >= 9_000);
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry::new("test_value".to_string(), Duration::from_millis(10));

        sleep(Duration::from_millis(40));

        assert_eq!(entry.ttl_remaining_ms(), 0);
    }

    #[test]
    fn test_touch_updates_last_access() {
        let entry = CacheEntry::new(42u32, Duration::from_secs(60));
        let before = entry.last_access_ms();

        sleep(Duration::from_millis(10));
        entry.touch();

        assert!(entry.last_access_ms() >= before);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        // Expiry is strictly after the expiration timestamp: a deadline one
        // second in the future is alive, one in the past is dead.
        let now = current_timestamp_ms();

        let alive = CacheEntry {
            value: "test".to_string(),
            expires_at: now + 1000,
            last_access: AtomicU64::new(now),
        };
        assert!(!alive.is_expired());

        let dead = CacheEntry {
            value: "test".to_string(),
            expires_at: now - 1000,
            last_access: AtomicU64::new(now),
        };
        assert!(dead.is_expired(), "Entry past its deadline is expired");
    }
}
