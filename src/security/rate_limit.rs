//! Fixed-window rate limiting for single-file override routes.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{
        header::{HeaderMap, HeaderName, RETRY_AFTER},
        HeaderValue, Request, StatusCode,
    },
    middleware::Next,
    response::Response,
};

use crate::config::RateLimitConfig;

/// Standard draft rate-limit headers; the legacy `X-RateLimit-*` family is
/// deliberately not sent.
pub const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
pub const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
pub const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

/// Per-client request window.
#[derive(Debug, Clone, Copy)]
struct RateWindow {
    window_start: Instant,
    count: u32,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32, reset_in: Duration },
    Denied { retry_after: Duration },
}

/// Fixed-window request counter keyed by client IP.
///
/// Every request counts toward the quota, allowed or not. Windows are
/// created lazily on a client's first request and reset in place once the
/// window elapses; the table only grows with distinct client addresses.
pub struct FixedWindowLimiter {
    windows: Mutex<HashMap<IpAddr, RateWindow>>,
    window: Duration,
    max_requests: u32,
}

impl FixedWindowLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window: Duration::from_secs(config.window_secs),
            max_requests: config.max_requests,
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Admit or reject a request from `client` at time `now`.
    ///
    /// The table lock serializes the read-modify-write for concurrent
    /// requests from the same client; a lost update here would let a burst
    /// exceed the quota.
    pub fn admit(&self, client: IpAddr, now: Instant) -> Decision {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");

        let window = windows.entry(client).or_insert(RateWindow {
            window_start: now,
            count: 0,
        });

        if now.duration_since(window.window_start) >= self.window {
            window.window_start = now;
            window.count = 0;
        }

        let reset_in = self.window - now.duration_since(window.window_start);

        if window.count < self.max_requests {
            window.count += 1;
            Decision::Allowed {
                remaining: self.max_requests - window.count,
                reset_in,
            }
        } else {
            Decision::Denied {
                retry_after: reset_in,
            }
        }
    }
}

/// Middleware gating single-file override routes.
///
/// Quota headers go out on every response so clients can self-throttle;
/// a denial is a 429 with `Retry-After`, not a server failure.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<Arc<FixedWindowLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = addr.ip();

    match limiter.admit(client, Instant::now()) {
        Decision::Allowed { remaining, reset_in } => {
            let mut response = next.run(request).await;
            set_ratelimit_headers(
                response.headers_mut(),
                limiter.max_requests(),
                remaining,
                reset_in,
            );
            response
        }
        Decision::Denied { retry_after } => {
            tracing::warn!(client = %client, "Rate limit exceeded");
            let mut response = Response::new(Body::from("Rate limit exceeded"));
            *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
            set_ratelimit_headers(
                response.headers_mut(),
                limiter.max_requests(),
                0,
                retry_after,
            );
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after.as_secs()));
            response
        }
    }
}

fn set_ratelimit_headers(headers: &mut HeaderMap, limit: u32, remaining: u32, reset_in: Duration) {
    headers.insert(RATELIMIT_LIMIT, HeaderValue::from(limit));
    headers.insert(RATELIMIT_REMAINING, HeaderValue::from(remaining));
    headers.insert(RATELIMIT_RESET, HeaderValue::from(reset_in.as_secs()));
}
