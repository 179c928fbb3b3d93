//! Rate Limiting
//!
//! Per-client request limits applied in front of every route. Two rules run
//! side by side: a general limit over a long window and a burst limit over a
//! short one. A request must pass both.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use serde_json::json;
use tracing::warn;

use crate::config::Config;

/// Key used when the connection address is unknown (e.g. in-process requests).
const UNKNOWN_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// How many requests a client may make within a window.
///
/// A `max` of zero disables the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitSpec {
    pub max: u32,
    pub window: Duration,
}

impl LimitSpec {
    pub const fn new(max: u32, window: Duration) -> Self {
        Self { max, window }
    }

    pub const fn disabled() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// GCRA quota allowing `max` back-to-back requests, refilling one slot
    /// every `window / max`.
    fn quota(&self) -> Option<Quota> {
        let burst = NonZeroU32::new(self.max)?;
        Quota::with_period(self.window / self.max).map(|q| q.allow_burst(burst))
    }
}

struct Rule {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    window: Duration,
    message: &'static str,
}

impl Rule {
    fn new(spec: LimitSpec, message: &'static str) -> Option<Self> {
        let quota = spec.quota()?;
        Some(Self {
            limiter: RateLimiter::keyed(quota),
            window: spec.window,
            message,
        })
    }

    fn rejection(&self) -> Response {
        let secs = self.window.as_secs().max(1);
        let body = Json(json!({
            "error": self.message,
            "retryAfter": human_window(secs),
        }));

        let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        response
    }
}

/// The general and burst limiters shared by all requests.
pub struct RateLimits {
    rules: Vec<Rule>,
}

impl RateLimits {
    pub fn new(general: LimitSpec, burst: LimitSpec) -> Self {
        let rules = [
            Rule::new(general, "Too many requests, please try again later."),
            Rule::new(burst, "Burst limit exceeded, please slow down."),
        ];
        Self {
            rules: rules.into_iter().flatten().collect(),
        }
    }

    /// No limits at all.
    pub fn unlimited() -> Self {
        Self::new(LimitSpec::disabled(), LimitSpec::disabled())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.rate_limit(), config.burst_limit())
    }

    pub fn is_enabled(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Counts one request for `client` against every rule. Returns the
    /// rejection of the first rule that is exhausted.
    fn check(&self, client: &IpAddr) -> Result<(), Response> {
        for rule in &self.rules {
            if rule.limiter.check_key(client).is_err() {
                warn!("Rate limit hit for {}: {}", client, rule.message);
                return Err(rule.rejection());
            }
        }
        Ok(())
    }
}

/// Middleware rejecting requests over either limit with 429.
pub async fn enforce_rate_limits(
    State(limits): State<Arc<RateLimits>>,
    request: Request,
    next: Next,
) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(UNKNOWN_CLIENT);

    match limits.check(&client) {
        Ok(()) => next.run(request).await,
        Err(rejection) => rejection,
    }
}

fn human_window(secs: u64) -> String {
    match secs {
        60 => "1 minute".to_string(),
        s if s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{} seconds", s),
    }
}
