//! Cache Statistics Module
//!
//! Process-wide operation counters owned by the facade, plus a serializable
//! point-in-time snapshot for the stats endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Operation Stats ==
/// Monotonic operation counters: hits, misses, sets, deletes.
///
/// Counters only reset at process start. Relaxed ordering is sufficient;
/// they are observability data, not synchronization points.
#[derive(Debug, Default)]
pub struct OperationStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
}

impl OperationStats {
    // == Constructor ==
    /// Creates a new OperationStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Set ==
    pub fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Delete ==
    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn sets(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
    }

    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    // == Hit Ratio ==
    /// Ratio of hits over lookups, smoothed against division by zero on a
    /// fresh process: `hits / max(hits + misses, 1)`.
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let lookups = hits + self.misses();
        hits as f64 / lookups.max(1) as f64
    }
}

// == Stats Snapshot ==
/// Point-in-time view of the cache, returned by `CacheService::stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Current number of entries in the store
    pub size: usize,
    /// Configured capacity bound
    pub max_size: usize,
    /// hits / max(hits + misses, 1)
    pub hit_ratio: f64,
    /// Number of live-value lookups
    pub hits: u64,
    /// Number of lookups that found nothing (absent or expired)
    pub misses: u64,
    /// Number of successful writes
    pub sets: u64,
    /// Number of delete operations (explicit and pattern-based)
    pub deletes: u64,
    /// Number of entries removed by capacity eviction
    pub evictions: u64,
}
