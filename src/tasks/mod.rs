//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Purge: Removes expired cache entries nobody has asked for lately

mod purge;

pub use purge::spawn_purge_task;
