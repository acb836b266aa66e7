//! Cache Service Module
//!
//! The facade over the entry store: operation counters, key fingerprinting,
//! compute-if-absent and pattern-based bulk invalidation.
//!
//! Constructed explicitly at boot and passed to whatever needs it; there is
//! no ambient global instance. Stored values may be shared between callers,
//! so returned `Value`s must be treated as read-only snapshots.

use std::future::Future;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::warn;

use crate::cache::{EntryStore, OperationStats, StatsSnapshot};
use crate::config::Config;

// == Cache Service ==
/// Facade over the [`EntryStore`], adding operation counters, fingerprint
/// generation, compute-if-absent semantics and regex bulk invalidation.
///
/// Errors never propagate out of the facade: failed writes come back as
/// `false`, failed computations as `None`, each with a log line. The worst
/// a broken cache can do to a caller is miss.
#[derive(Debug)]
pub struct CacheService {
    /// Thread-safe entry store, shared with the background sweep task
    store: Arc<RwLock<EntryStore>>,
    /// Process-wide operation counters
    stats: OperationStats,
}

impl CacheService {
    // == Constructors ==
    /// Creates a new CacheService from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_capacity(config.max_entries, config.default_ttl)
    }

    /// Creates a new CacheService with explicit capacity and default TTL.
    pub fn with_capacity(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            store: Arc::new(RwLock::new(EntryStore::new(max_entries, default_ttl))),
            stats: OperationStats::new(),
        }
    }

    // == Store Handle ==
    /// Shared handle to the underlying store, used to wire up the sweep task.
    pub fn store(&self) -> Arc<RwLock<EntryStore>> {
        Arc::clone(&self.store)
    }

    // == Generate Key ==
    /// Derives a fixed-length fingerprint from a prefix plus a canonical
    /// serialization of the argument payload.
    ///
    /// serde_json maps serialize with sorted keys, so payloads that are
    /// equal as JSON objects fingerprint identically regardless of how they
    /// were assembled. Sha256 is used purely for content addressing here;
    /// collisions are an accepted low-probability risk and nothing relies
    /// on this being a security boundary.
    pub fn generate_key(prefix: &str, payload: &Value) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prefix.as_bytes());
        hasher.update(b":");
        hasher.update(payload.to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    // == Get ==
    /// Retrieves a live value, counting a hit; counts a miss and returns
    /// `None` if the key is absent or expired.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let mut store = self.store.write().await;
        match store.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a value with optional TTL (seconds). Returns `false` and logs
    /// if the store rejects the write; never propagates an error.
    pub async fn set(&self, key: &str, value: Value, ttl: Option<u64>) -> bool {
        let mut store = self.store.write().await;
        match store.set(key.to_string(), value, ttl) {
            Ok(()) => {
                self.stats.record_set();
                true
            }
            Err(e) => {
                warn!("Failed to cache key '{}': {}", key, e);
                false
            }
        }
    }

    // == Delete ==
    /// Removes an entry. Returns whether an entry was present; never errors.
    pub async fn delete(&self, key: &str) -> bool {
        let removed = self.store.write().await.delete(key);
        self.stats.record_delete();
        removed
    }

    // == Is Live ==
    /// True if the key currently holds an unexpired entry. Does not touch
    /// the hit/miss counters or the entry's access count; used by warm-up
    /// to probe keys without skewing observability.
    pub async fn is_live(&self, key: &str) -> bool {
        !self.store.read().await.is_expired(key)
    }

    // == Get Or Set ==
    /// Returns the cached value if live; otherwise runs `compute` exactly
    /// once, stores its result and returns it.
    ///
    /// A failing `compute` is logged and swallowed: the caller sees `None`
    /// and nothing is stored, so the next call retries the computation
    /// rather than serving a poisoned entry.
    pub async fn get_or_set<F, Fut>(&self, key: &str, compute: F, ttl: Option<u64>) -> Option<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<Value>>,
    {
        if let Some(value) = self.get(key).await {
            return Some(value);
        }

        match compute().await {
            Ok(value) => {
                self.set(key, value.clone(), ttl).await;
                Some(value)
            }
            Err(e) => {
                warn!("Compute callback for key '{}' failed: {}", key, e);
                None
            }
        }
    }

    // == Clear Pattern ==
    /// Deletes every stored key matching `pattern` (unanchored regex
    /// search). An invalid pattern is logged and treated as a no-op. Cost is
    /// linear in store size; this is the only bulk-invalidation primitive.
    ///
    /// Returns the number of entries removed.
    pub async fn clear_pattern(&self, pattern: &str) -> usize {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                warn!("Invalid invalidation pattern '{}': {}", pattern, e);
                return 0;
            }
        };

        let mut store = self.store.write().await;
        let matching: Vec<String> = store
            .keys()
            .filter(|key| re.is_match(key))
            .cloned()
            .collect();

        for key in &matching {
            store.delete(key);
            self.stats.record_delete();
        }

        matching.len()
    }

    // == Stats ==
    /// Point-in-time snapshot of store occupancy and operation counters.
    pub async fn stats(&self) -> StatsSnapshot {
        let store = self.store.read().await;
        StatsSnapshot {
            size: store.len(),
            max_size: store.max_entries(),
            hit_ratio: self.stats.hit_ratio(),
            hits: self.stats.hits(),
            misses: self.stats.misses(),
            sets: self.stats.sets(),
            deletes: self.stats.deletes(),
            evictions: store.evictions(),
        }
    }
}
