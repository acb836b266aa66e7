//! Error types for the cache service
//!
//! Provides unified error handling using thiserror.
//!
//! Store-level errors never escape the facade: `CacheService` converts them
//! to boolean outcomes plus a log line, so a cache malfunction degrades to
//! "always miss" rather than failing a request handler. The `IntoResponse`
//! impl only serves the thin HTTP surface (request validation).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid key, value or request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Store is full and eviction found no candidate
    #[error("Cache full: {0}")]
    CacheFull(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::CacheFull(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache service.
pub type Result<T> = std::result::Result<T, CacheError>;
