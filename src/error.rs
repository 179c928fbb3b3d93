//! Error types for the record cache service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for the record cache service.
///
/// `Clone` because one fetch outcome is handed to every caller coalesced onto it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Lookup for an id the store does not hold
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Malformed request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request body over the configured size limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Path id that is not an integer
    #[error("Invalid user ID: {0}")]
    InvalidId(String),

    /// Backing store failed to serve the request
    #[error("Store error: {0}")]
    Store(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short, stable title used as the `error` field of JSON bodies.
    pub fn title(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Not Found",
            AppError::UserNotFound(_) => "User not found",
            AppError::InvalidRequest(_) => "Validation Error",
            AppError::InvalidId(_) => "Invalid user ID",
            AppError::PayloadTooLarge(_) => "Payload Too Large",
            AppError::Store(_) | AppError::Internal(_) => "Internal Server Error",
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound(msg)
            | AppError::UserNotFound(msg)
            | AppError::InvalidRequest(msg)
            | AppError::InvalidId(msg)
            | AppError::PayloadTooLarge(msg) => msg.clone(),
            // Store/internal details stay in the logs
            AppError::Store(_) | AppError::Internal(_) => {
                tracing::error!("Request failed: {}", self);
                "Failed to process request".to_string()
            }
        };

        let body = Json(json!({
            "error": self.title(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the record cache service.
pub type Result<T> = std::result::Result<T, AppError>;
