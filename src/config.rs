//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::api::LimitSpec;
use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Time-to-live of a cache entry in milliseconds
    pub ttl_ms: u64,
    /// Background purge interval in seconds
    pub purge_interval_secs: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Artificial latency of a backing-store lookup in milliseconds
    pub fetch_latency_ms: u64,
    /// Requests allowed per client within the general window (0 disables)
    pub rate_limit_max: u32,
    /// General rate-limit window in seconds
    pub rate_limit_window_secs: u64,
    /// Requests allowed per client within the burst window (0 disables)
    pub burst_limit_max: u32,
    /// Burst rate-limit window in seconds
    pub burst_limit_window_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 60000)
    /// - `PURGE_INTERVAL_SECS` - Purge frequency in seconds (default: 30)
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `FETCH_LATENCY_MS` - Simulated store latency (default: 200)
    /// - `RATE_LIMIT_MAX` / `RATE_LIMIT_WINDOW_SECS` - General limit (default: 10 per 60s)
    /// - `BURST_LIMIT_MAX` / `BURST_LIMIT_WINDOW_SECS` - Burst limit (default: 5 per 10s)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("CACHE_MAX_ENTRIES", defaults.max_entries),
            ttl_ms: env_or("CACHE_TTL_MS", defaults.ttl_ms),
            purge_interval_secs: env_or("PURGE_INTERVAL_SECS", defaults.purge_interval_secs),
            server_port: env_or("PORT", defaults.server_port),
            fetch_latency_ms: env_or("FETCH_LATENCY_MS", defaults.fetch_latency_ms),
            rate_limit_max: env_or("RATE_LIMIT_MAX", defaults.rate_limit_max),
            rate_limit_window_secs: env_or(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            ),
            burst_limit_max: env_or("BURST_LIMIT_MAX", defaults.burst_limit_max),
            burst_limit_window_secs: env_or(
                "BURST_LIMIT_WINDOW_SECS",
                defaults.burst_limit_window_secs,
            ),
        }
    }

    /// Entry TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Purge interval as a `Duration`.
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }

    /// Backing-store latency as a `Duration`.
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    /// General per-client request limit.
    pub fn rate_limit(&self) -> LimitSpec {
        LimitSpec::new(
            self.rate_limit_max,
            Duration::from_secs(self.rate_limit_window_secs),
        )
    }

    /// Short-window per-client request limit.
    pub fn burst_limit(&self) -> LimitSpec {
        LimitSpec::new(
            self.burst_limit_max,
            Duration::from_secs(self.burst_limit_window_secs),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl_ms: DEFAULT_TTL.as_secs() * 1000,
            purge_interval_secs: 30,
            server_port: 3000,
            fetch_latency_ms: 200,
            rate_limit_max: 10,
            rate_limit_window_secs: 60,
            burst_limit_max: 5,
            burst_limit_window_secs: 10,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.ttl_ms, 60_000);
        assert_eq!(config.purge_interval_secs, 30);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.fetch_latency_ms, 200);
    }

    #[test]
    fn test_config_durations() {
        let config = Config::default();
        assert_eq!(config.ttl(), Duration::from_secs(60));
        assert_eq!(config.purge_interval(), Duration::from_secs(30));
        assert_eq!(config.fetch_latency(), Duration::from_millis(200));
    }

    #[test]
    fn test_config_rate_limits() {
        let config = Config::default();
        assert_eq!(
            config.rate_limit(),
            LimitSpec::new(10, Duration::from_secs(60))
        );
        assert_eq!(
            config.burst_limit(),
            LimitSpec::new(5, Duration::from_secs(10))
        );
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("RECORD_CACHE_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("RECORD_CACHE_TEST_GARBAGE", 42u64), 42);
        env::remove_var("RECORD_CACHE_TEST_GARBAGE");
    }

    #[test]
    fn test_env_or_reads_value() {
        env::set_var("RECORD_CACHE_TEST_VALUE", "7");
        assert_eq!(env_or("RECORD_CACHE_TEST_VALUE", 42usize), 7);
        env::remove_var("RECORD_CACHE_TEST_VALUE");
    }
}
