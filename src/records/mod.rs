//! Records Module
//!
//! The record entity, its backing store and the read-through service that
//! puts the cache in front of it.

mod model;
mod service;
mod store;

pub use model::Record;
pub use service::{RecordLookup, RecordService};
pub use store::{InMemoryRecordStore, RecordStore};
