//! Response DTOs for the record cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::StatsReport;
use crate::records::{Record, RecordLookup};

/// Response body for GET /users/:id
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub data: Record,
    /// Served from the cache without a store fetch
    pub cached: bool,
    /// Lookup latency in milliseconds
    pub response_time: u64,
}

impl From<RecordLookup> for RecordResponse {
    fn from(lookup: RecordLookup) -> Self {
        Self {
            data: lookup.record,
            cached: lookup.cached,
            response_time: u64::try_from(lookup.response_time.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Response body for POST /users
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub data: Record,
    pub message: String,
}

impl CreatedResponse {
    pub fn new(data: Record) -> Self {
        Self {
            data,
            message: "User created successfully".to_string(),
        }
    }
}

/// Plain acknowledgement, e.g. for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for GET /cache-status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatusResponse {
    pub cache_stats: StatsReport,
    /// ISO 8601 time of the snapshot
    pub timestamp: String,
}

impl CacheStatusResponse {
    pub fn new(cache_stats: StatsReport) -> Self {
        Self {
            cache_stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status ("OK")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "OK".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;
    use std::time::Duration;

    #[test]
    fn test_record_response_from_lookup() {
        let lookup = RecordLookup {
            record: Record::new(1, "John Doe", "john@example.com"),
            cached: true,
            response_time: Duration::from_millis(12),
        };
        let json = serde_json::to_value(RecordResponse::from(lookup)).unwrap();

        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["cached"], true);
        assert_eq!(json["responseTime"], 12);
    }

    #[test]
    fn test_created_response_serialize() {
        let resp = CreatedResponse::new(Record::new(4, "Ann", "ann@x.com"));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("ann@x.com"));
        assert!(json.contains("created successfully"));
    }

    #[test]
    fn test_cache_status_serialize() {
        let resp = CacheStatusResponse::new(CacheStats::new().report());
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["cacheStats"]["hits"], 0);
        assert_eq!(json["cacheStats"]["averageResponseTime"], 0.0);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("OK"));
        assert!(json.contains("timestamp"));
    }
}
