//! Request DTOs for the record cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for record creation (POST /users)
///
/// Missing fields deserialize as empty strings so that both "absent" and
/// "blank" are rejected by [`CreateRecordRequest::validate`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecordRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl CreateRecordRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() || self.email.is_empty() {
            return Some("Name and email are required".to_string());
        }
        None
    }
}

/// Parses a record id path segment.
pub fn parse_record_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}
