//! Record Cache - a read-through cache in front of a slow record store
//!
//! A bounded TTL/LRU cache plus a request-coalescing layer, so concurrent
//! misses on one key cost a single backing-store fetch.

pub mod api;
pub mod cache;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_purge_task;
