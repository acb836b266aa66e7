//! Entry Store Module
//!
//! Core cache engine: a HashMap of entries with TTL expiration and
//! frequency-based capacity eviction.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::{CacheEntry, MAX_KEY_LENGTH, MAX_VALUE_BYTES};
use crate::error::{CacheError, Result};

// == Entry Store ==
/// Bounded key/value store with per-entry TTL and frequency-based eviction.
///
/// Eviction policy: when inserting a *new* key at capacity, the entry with
/// the minimum `access_count` is removed first. Ties are broken by the
/// lexicographically smallest key, which keeps the choice deterministic
/// regardless of HashMap iteration order.
#[derive(Debug)]
pub struct EntryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in seconds for entries without explicit TTL
    default_ttl: u64,
    /// Number of entries removed by capacity eviction
    evictions: u64,
}

impl EntryStore {
    // == Constructor ==
    /// Creates a new EntryStore with specified capacity and default TTL.
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            default_ttl,
            evictions: 0,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` both for keys that were never set and for entries
    /// whose TTL has elapsed; an expired entry is removed on observation
    /// rather than waiting for the next sweep. On a live hit the entry's
    /// access counter is incremented.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let expired = self.entries.get(key)?.is_expired();
        if expired {
            self.entries.remove(key);
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.record_access();
        Some(entry.value.clone())
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL (seconds).
    ///
    /// Writing an existing key replaces the entry, resetting its expiry and
    /// access count. Inserting a new key at capacity evicts exactly one
    /// entry first.
    pub fn set(&mut self, key: String, value: Value, ttl: Option<u64>) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        let encoded_len = serde_json::to_vec(&value)
            .map_err(|e| CacheError::InvalidRequest(format!("Unencodable value: {}", e)))?
            .len();
        if encoded_len > MAX_VALUE_BYTES {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_BYTES
            )));
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(victim) = self.least_used_key() {
                self.entries.remove(&victim);
                self.evictions += 1;
            } else {
                return Err(CacheError::CacheFull(
                    "Store is full and eviction found no candidate".to_string(),
                ));
            }
        }

        let effective_ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key, CacheEntry::new(value, effective_ttl));

        Ok(())
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether an entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Is Expired ==
    /// Returns true if the key is absent or its TTL has elapsed.
    pub fn is_expired(&self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => true,
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Invoked by the background sweep rather than on every access, so
    /// per-request latency stays bounded by a single map lookup.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Eviction Candidate ==
    /// Key of the entry with the minimum access count; ties resolved to the
    /// lexicographically smallest key.
    fn least_used_key(&self) -> Option<String> {
        self.entries
            .iter()
            .min_by(|(ka, ea), (kb, eb)| {
                ea.access_count
                    .cmp(&eb.access_count)
                    .then_with(|| ka.cmp(kb))
            })
            .map(|(key, _)| key.clone())
    }

    // == Keys ==
    /// Iterates all currently stored keys (live and not-yet-swept alike).
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    // == Evictions ==
    /// Number of entries removed by capacity eviction since construction.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Max Entries ==
    /// Configured capacity bound.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
