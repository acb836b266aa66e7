//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the bulk-invalidation operation (POST /cache/clear)
///
/// # Fields
/// - `pattern`: regular expression matched against every stored key
#[derive(Debug, Clone, Deserialize)]
pub struct ClearRequest {
    /// The invalidation pattern
    pub pattern: String,
}

impl ClearRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.pattern.is_empty() {
            return Some("Pattern cannot be empty".to_string());
        }
        None
    }
}
