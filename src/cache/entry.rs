//! Cache Entry Module
//!
//! Defines the structure of individual cache entries with TTL support and
//! per-entry access accounting.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A single cache entry: opaque JSON payload plus expiry and access metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Number of successful reads since the entry was (re)written
    pub access_count: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    ///
    /// A freshly written entry starts with an `access_count` of 1; rewriting
    /// a key replaces the whole entry, so access statistics reset on every
    /// `set`.
    pub fn new(value: Value, ttl_seconds: u64) -> Self {
        Self {
            value,
            expires_at: current_timestamp_ms() + ttl_seconds * 1000,
            access_count: 1,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is considered expired when the current
    /// time is greater than or equal to the expiration time, so once the TTL
    /// duration has fully elapsed the entry is immediately dead.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Record Access ==
    /// Increments the access counter. Called on every successful read; the
    /// counter is what the eviction policy ranks entries by.
    pub fn record_access(&mut self) {
        self.access_count += 1;
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds; 0 once expired.
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
