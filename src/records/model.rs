//! Record Model
//!
//! The entity served by the backing store and held in the cache.

use serde::{Deserialize, Serialize};

/// A stored record. Ids are assigned by the backing store and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl Record {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Cache key a record with `id` lives under.
    pub fn cache_key(id: i64) -> String {
        format!("record:{}", id)
    }
}
