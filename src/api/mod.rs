//! API Module
//!
//! HTTP boundary for the record cache: parses requests, calls the record
//! service and cache, renders JSON.
//!
//! # Endpoints
//! - `GET /health` - Liveness check
//! - `GET /users/:id` - Read-through record lookup
//! - `POST /users` - Create a record
//! - `DELETE /cache` - Clear the cache
//! - `GET /cache-status` - Cache statistics

pub mod handlers;
pub mod rate_limit;
pub mod routes;

pub use handlers::*;
pub use rate_limit::{LimitSpec, RateLimits};
pub use routes::create_router;
