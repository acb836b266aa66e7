//! API Module
//!
//! HTTP handlers and routing for the cache service surface.
//!
//! # Endpoints
//! - `GET /cache/stats` - Point-in-time cache statistics
//! - `POST /cache/clear` - Pattern-based bulk invalidation
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
