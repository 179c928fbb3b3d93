//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_status_handler, clear_cache_handler, create_record_handler, get_record_handler,
    health_handler, not_found_handler, AppState,
};
use super::rate_limit::enforce_rate_limits;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Liveness check
/// - `GET /users/:id` - Read-through record lookup
/// - `POST /users` - Create a record (written through to the cache)
/// - `DELETE /cache` - Drop all cached entries
/// - `GET /cache-status` - Cache statistics
///
/// # Middleware
/// - Rate limiting: general and burst per-client limits from `state.limits`
/// - Body limit: 10 MiB
/// - Compression: gzip when the client accepts it
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/users/:id", get(get_record_handler))
        .route("/users", post(create_record_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/cache-status", get(cache_status_handler))
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(
            state.limits.clone(),
            enforce_rate_limits,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
