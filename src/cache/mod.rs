//! Cache Module
//!
//! In-process caching with TTL expiration, frequency-based eviction,
//! pattern-based invalidation and memoization wrappers.

mod entry;
mod memo;
mod service;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use memo::{cached, invalidate_after, CacheWarmer};
pub use service::CacheService;
pub use stats::{OperationStats, StatsSnapshot};
pub use store::EntryStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed serialized value size in bytes
pub const MAX_VALUE_BYTES: usize = 1024 * 1024; // 1 MB
