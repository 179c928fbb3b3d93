//! Request Coalescing Module
//!
//! Deduplicates concurrent fetches so a burst of misses on one key costs a
//! single backing-store call.

mod executor;

pub use executor::Coalescer;
