//! API Handlers
//!
//! HTTP request handlers for the cache service endpoints. These are the two
//! operations the surrounding catalog service exposes over the facade: a
//! read-only statistics snapshot and a pattern-based invalidation write.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::{CacheService, StatsSnapshot};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{ClearRequest, ClearResponse, HealthResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache facade, constructed once at boot
    pub cache: Arc<CacheService>,
}

impl AppState {
    /// Creates a new AppState around an existing cache service.
    pub fn new(cache: CacheService) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheService::new(config))
    }
}

/// Handler for GET /cache/stats
///
/// Returns a point-in-time snapshot of store occupancy, hit ratio and
/// operation counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.cache.stats().await)
}

/// Handler for POST /cache/clear
///
/// Deletes every cached key matching the submitted regular expression. An
/// invalid regex is a logged no-op inside the facade, reported back as zero
/// removals rather than a failure.
pub async fn clear_handler(
    State(state): State<AppState>,
    Json(req): Json<ClearRequest>,
) -> Result<Json<ClearResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let removed = state.cache.clear_pattern(&req.pattern).await;

    Ok(Json(ClearResponse::new(req.pattern, removed)))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::new(CacheService::with_capacity(100, 300))
    }

    #[tokio::test]
    async fn test_stats_handler_fresh_service() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.size, 0);
        assert_eq!(response.max_size, 100);
        assert_eq!(response.hit_ratio, 0.0);
    }

    #[tokio::test]
    async fn test_stats_handler_reflects_operations() {
        let state = test_state();

        state.cache.set("products:1", json!({"id": 1}), None).await;
        state.cache.get("products:1").await;
        state.cache.get("absent").await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.size, 1);
        assert_eq!(response.hits, 1);
        assert_eq!(response.misses, 1);
        assert_eq!(response.sets, 1);
    }

    #[tokio::test]
    async fn test_clear_handler_removes_matching_keys() {
        let state = test_state();

        state.cache.set("products:1", json!(1), None).await;
        state.cache.set("products:2", json!(2), None).await;
        state.cache.set("brands:1", json!(3), None).await;

        let req = ClearRequest {
            pattern: "^products:".to_string(),
        };
        let response = clear_handler(State(state.clone()), Json(req)).await.unwrap();

        assert_eq!(response.removed, 2);
        assert_eq!(state.cache.get("brands:1").await, Some(json!(3)));
    }

    #[tokio::test]
    async fn test_clear_handler_invalid_regex_is_noop() {
        let state = test_state();
        state.cache.set("products:1", json!(1), None).await;

        let req = ClearRequest {
            pattern: "[unclosed".to_string(),
        };
        let response = clear_handler(State(state.clone()), Json(req)).await.unwrap();

        assert_eq!(response.removed, 0);
        assert_eq!(state.cache.get("products:1").await, Some(json!(1)));
    }

    #[tokio::test]
    async fn test_clear_handler_rejects_empty_pattern() {
        let state = test_state();

        let req = ClearRequest {
            pattern: "".to_string(),
        };
        let result = clear_handler(State(state), Json(req)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
