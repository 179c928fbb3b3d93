//! Request and Response models for the record cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{parse_record_id, CreateRecordRequest};
pub use responses::{
    CacheStatusResponse, CreatedResponse, HealthResponse, MessageResponse, RecordResponse,
};
