//! API Handlers
//!
//! HTTP request handlers for each endpoint. They parse and validate input,
//! call into the record service or cache, and shape the JSON.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::{self, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    parse_record_id, CacheStatusResponse, CreateRecordRequest, CreatedResponse, HealthResponse,
    MessageResponse, RecordResponse,
};
use crate::records::{InMemoryRecordStore, Record, RecordService, RecordStore};

use super::rate_limit::RateLimits;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache the service reads through; also cleared and reported directly
    pub cache: SharedCache<Record>,
    pub service: Arc<RecordService>,
    /// Per-client limits enforced by the router middleware
    pub limits: Arc<RateLimits>,
}

impl AppState {
    /// Builds state around an existing cache and backing store, with no
    /// rate limits. Use [`AppState::with_rate_limits`] to add them.
    pub fn new(cache: SharedCache<Record>, store: Arc<dyn RecordStore>) -> Self {
        let service = RecordService::new(cache.clone(), store);
        Self {
            cache,
            service: Arc::new(service),
            limits: Arc::new(RateLimits::unlimited()),
        }
    }

    pub fn with_rate_limits(mut self, limits: RateLimits) -> Self {
        self.limits = Arc::new(limits);
        self
    }

    /// Creates a new AppState from configuration, backed by the seeded
    /// in-memory store.
    pub fn from_config(config: &Config) -> Self {
        let cache = cache::shared(CacheStore::new(config.max_entries, config.ttl()));
        let store = Arc::new(InMemoryRecordStore::seeded(config.fetch_latency()));
        Self::new(cache, store).with_rate_limits(RateLimits::from_config(config))
    }
}

/// Handler for GET /users/:id
///
/// The id must be a whole `i64`; trailing garbage such as `12abc` or `1.5` is
/// rejected rather than truncated to a leading number.
pub async fn get_record_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<RecordResponse>> {
    let id = parse_record_id(&raw_id)
        .ok_or_else(|| AppError::InvalidId("User ID must be a number".to_string()))?;

    let lookup = state
        .service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::UserNotFound(format!("User with ID {} does not exist", id)))?;

    Ok(Json(lookup.into()))
}

/// Handler for POST /users
pub async fn create_record_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let Json(req) = body.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(rejection.body_text()),
        _ => AppError::InvalidRequest(rejection.body_text()),
    })?;

    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let record = state.service.create(req.name, req.email).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(record))))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.write().await.clear();
    info!("Cache cleared");

    Json(MessageResponse::new("Cache cleared successfully"))
}

/// Handler for GET /cache-status
pub async fn cache_status_handler(State(state): State<AppState>) -> Json<CacheStatusResponse> {
    let stats = state.cache.read().await.stats();

    Json(CacheStatusResponse::new(stats.report()))
}

/// Handler for GET /health. Does not touch the cache.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> AppError {
    AppError::NotFound("The requested endpoint does not exist".to_string())
}
