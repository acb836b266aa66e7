//! Memoization Module
//!
//! Higher-order wrappers that apply the cache facade around arbitrary
//! computations, plus a warm-up utility that populates selected keys at
//! startup. The surrounding catalog service uses these around listing
//! queries, filter aggregation and per-brand detail lookups.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::CacheService;

// == Cached ==
/// Memoizes a computation through the cache facade.
///
/// The fingerprint is derived from `key_prefix` plus the call's argument
/// payload, so argument-equal calls within the TTL window run `compute` at
/// most once between them, while different arguments are independent.
///
/// Unlike [`CacheService::get_or_set`], a failing `compute` propagates to
/// the caller: the wrapped computation keeps its own failure semantics and
/// nothing is stored on error.
pub async fn cached<F, Fut>(
    cache: &CacheService,
    key_prefix: &str,
    args: &Value,
    ttl: Option<u64>,
    compute: F,
) -> anyhow::Result<Value>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<Value>>,
{
    let key = CacheService::generate_key(key_prefix, args);

    if let Some(value) = cache.get(&key).await {
        return Ok(value);
    }

    let value = compute().await?;
    cache.set(&key, value.clone(), ttl).await;
    Ok(value)
}

// == Invalidate After ==
/// Runs a write operation, then clears every cached key matching `pattern`,
/// then returns the operation's output.
///
/// This is invalidate-*after*, not invalidate-*before*: a reader racing
/// between the write and the invalidation may observe stale cached data for
/// one TTL window.
pub async fn invalidate_after<F, Fut, T>(cache: &CacheService, pattern: &str, operation: F) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let result = operation().await;
    let removed = cache.clear_pattern(pattern).await;
    debug!("Invalidated {} entries matching '{}'", removed, pattern);
    result
}

// == Warm-up Task ==
type ComputeFn =
    Box<dyn Fn() -> Pin<Box<dyn Future<Output = anyhow::Result<Value>> + Send>> + Send + Sync>;

struct WarmTask {
    key: String,
    ttl: Option<u64>,
    compute: ComputeFn,
}

// == Cache Warmer ==
/// Populates selected keys once at process start, before traffic is
/// accepted. A failing task is logged and skipped; the remaining tasks
/// still run.
#[derive(Default)]
pub struct CacheWarmer {
    tasks: Vec<WarmTask>,
}

impl CacheWarmer {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Add Task ==
    /// Registers a key to pre-populate with the given computation and TTL.
    pub fn add_task<F, Fut>(&mut self, key: impl Into<String>, ttl: Option<u64>, compute: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        self.tasks.push(WarmTask {
            key: key.into(),
            ttl,
            compute: Box::new(move || Box::pin(compute())),
        });
    }

    // == Warm Up ==
    /// Runs every registered task whose key is not already live.
    ///
    /// Returns the number of keys populated.
    pub async fn warm_up(&self, cache: &CacheService) -> usize {
        info!("Warming cache: {} tasks registered", self.tasks.len());
        let mut populated = 0;

        for task in &self.tasks {
            if cache.is_live(&task.key).await {
                debug!("Skipping warm-up for live key '{}'", task.key);
                continue;
            }

            match (task.compute)().await {
                Ok(value) => {
                    if cache.set(&task.key, value, task.ttl).await {
                        debug!("Warmed key '{}'", task.key);
                        populated += 1;
                    }
                }
                Err(e) => {
                    warn!("Warm-up for key '{}' failed: {}", task.key, e);
                }
            }
        }

        info!("Cache warm-up complete: {} keys populated", populated);
        populated
    }

    // == Length ==
    /// Number of registered warm-up tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_cached_memoizes_by_arguments() {
        let cache = CacheService::with_capacity(100, 300);
        let calls = AtomicU64::new(0);

        let compute = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!("listing"))
        };

        let first = cached(&cache, "products", &json!({"page": 1}), Some(60), compute)
            .await
            .unwrap();
        let second = cached(&cache, "products", &json!({"page": 1}), Some(60), compute)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Different arguments use a different fingerprint
        cached(&cache, "products", &json!({"page": 2}), Some(60), compute)
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cached_propagates_compute_failure() {
        let cache = CacheService::with_capacity(100, 300);

        let result = cached(&cache, "products", &json!({"page": 1}), Some(60), || async {
            Err(anyhow::anyhow!("query failed"))
        })
        .await;

        assert!(result.is_err());

        // Nothing stored; a later call recomputes successfully
        let value = cached(&cache, "products", &json!({"page": 1}), Some(60), || async {
            Ok(json!("recovered"))
        })
        .await
        .unwrap();
        assert_eq!(value, json!("recovered"));
    }

    #[tokio::test]
    async fn test_invalidate_after_clears_and_returns() {
        let cache = CacheService::with_capacity(100, 300);

        cache.set("products:list", json!([1, 2]), None).await;
        cache.set("brands:list", json!(["acme"]), None).await;

        let result = invalidate_after(&cache, "^products:", || async { "written" }).await;

        assert_eq!(result, "written");
        assert_eq!(cache.get("products:list").await, None);
        assert_eq!(cache.get("brands:list").await, Some(json!(["acme"])));
    }

    #[tokio::test]
    async fn test_warm_up_populates_missing_keys() {
        let cache = CacheService::with_capacity(100, 300);
        let mut warmer = CacheWarmer::new();

        warmer.add_task("brands:all", Some(600), || async { Ok(json!(["acme", "zeta"])) });
        warmer.add_task("filters:all", Some(600), || async { Ok(json!({"sizes": [1, 2]})) });

        let populated = warmer.warm_up(&cache).await;

        assert_eq!(populated, 2);
        assert_eq!(cache.get("brands:all").await, Some(json!(["acme", "zeta"])));
    }

    #[tokio::test]
    async fn test_warm_up_skips_live_keys() {
        let cache = CacheService::with_capacity(100, 300);
        cache.set("brands:all", json!(["existing"]), None).await;

        let mut warmer = CacheWarmer::new();
        warmer.add_task("brands:all", Some(600), || async { Ok(json!(["fresh"])) });

        assert_eq!(warmer.warm_up(&cache).await, 0);
        assert_eq!(cache.get("brands:all").await, Some(json!(["existing"])));
    }

    #[tokio::test]
    async fn test_warm_up_failure_does_not_abort_remaining_tasks() {
        let cache = CacheService::with_capacity(100, 300);
        let ran = Arc::new(AtomicU64::new(0));

        let mut warmer = CacheWarmer::new();
        warmer.add_task("broken", Some(600), || async {
            Err(anyhow::anyhow!("source unavailable"))
        });
        let ran_clone = Arc::clone(&ran);
        warmer.add_task("healthy", Some(600), move || {
            let ran = Arc::clone(&ran_clone);
            async move {
                ran.fetch_add(1, Ordering::SeqCst);
                Ok(json!("warmed"))
            }
        });

        assert_eq!(warmer.warm_up(&cache).await, 1);
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get("healthy").await, Some(json!("warmed")));
    }
}
