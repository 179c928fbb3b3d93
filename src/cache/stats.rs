//! Cache Statistics Module
//!
//! Tracks cache performance metrics: hits, misses, evictions and response times.

use std::time::Duration;

use serde::Serialize;

// == Cache Stats ==
/// Process-wide cache counters.
///
/// Counters only ever grow; `clear()` on the store empties entries but leaves
/// these untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Lookups that returned a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Every lookup, hit or miss
    pub total_requests: u64,
    /// Sum of recorded end-to-end response times
    pub total_response_time: Duration,
    /// Entries dropped by the LRU policy
    pub evictions: u64,
    /// Entries held at snapshot time
    pub current_size: usize,
}

impl CacheStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// hits / total_requests, or 0.0 when nothing has been looked up.
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_requests as f64
        }
    }

    // == Average Response Time ==
    /// total_response_time / total_requests, zero when there were no requests.
    pub fn average_response_time(&self) -> Duration {
        if self.total_requests == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total_response_time.as_nanos() / u128::from(self.total_requests);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Average response time in fractional milliseconds.
    pub fn average_response_time_ms(&self) -> f64 {
        self.average_response_time().as_secs_f64() * 1000.0
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
        self.total_requests += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
        self.total_requests += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_response_time(&mut self, elapsed: Duration) {
        self.total_response_time += elapsed;
    }

    pub fn set_current_size(&mut self, count: usize) {
        self.current_size = count;
    }

    /// JSON-facing view with derived fields filled in.
    pub fn report(&self) -> StatsReport {
        StatsReport {
            hits: self.hits,
            misses: self.misses,
            current_size: self.current_size,
            total_requests: self.total_requests,
            average_response_time: self.average_response_time_ms(),
            evictions: self.evictions,
            hit_rate: self.hit_rate(),
        }
    }
}

// == Stats Report ==
/// Serializable snapshot returned by the status endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub hits: u64,
    pub misses: u64,
    pub current_size: usize,
    pub total_requests: u64,
    /// Milliseconds
    pub average_response_time: f64,
    pub evictions: u64,
    pub hit_rate: f64,
}
