//! Catalog Cache - An in-process cache service for a catalog backend
//!
//! Provides a thread-safe key/value store with TTL expiration, bounded
//! capacity with frequency-based eviction, a background reclamation sweep,
//! pattern-based bulk invalidation and memoization wrappers.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::CacheService;
pub use config::Config;
pub use tasks::SweepTask;
