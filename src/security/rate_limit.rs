//! Fixed-window rate limiting middleware.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::time;

use crate::config::RateLimitConfig;
use crate::observability::metrics;

pub const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
pub const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

const LIMITED_BODY: &str = "Too many requests, please try again later.";

/// One client's counter for the current window.
#[derive(Debug, Clone, Copy)]
struct Window {
    opened: Instant,
    count: u32,
}

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32, reset_after: Duration },
    Limited { reset_after: Duration },
}

/// Per-client fixed-window limiter.
///
/// A client's window opens on its first request and closes `window` later;
/// the next request after that opens a fresh one.
pub struct FixedWindowLimiter {
    windows: DashMap<String, Window>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, Duration::from_secs(config.window_secs))
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, time::Instant::now().into_std())
    }

    /// Count a request from `key` observed at `now`.
    pub fn check_at(&self, key: &str, now: Instant) -> Decision {
        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert(Window { opened: now, count: 0 });

        if now.saturating_duration_since(entry.opened) >= self.window {
            *entry = Window { opened: now, count: 0 };
        }

        let reset_after = self.window.saturating_sub(now.saturating_duration_since(entry.opened));

        if entry.count >= self.max_requests {
            return Decision::Limited { reset_after };
        }

        entry.count += 1;
        Decision::Allowed {
            remaining: self.max_requests - entry.count,
            reset_after,
        }
    }

    /// Drop windows that have closed. Returns how many were removed.
    pub fn prune(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.opened) < self.window);
        before.saturating_sub(self.windows.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

/// Periodically evict closed windows until shutdown.
pub async fn run_sweeper(limiter: Arc<FixedWindowLimiter>, mut shutdown: broadcast::Receiver<()>) {
    let mut ticker = time::interval(limiter.window());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let evicted = limiter.prune(time::Instant::now().into_std());
                if evicted > 0 {
                    tracing::debug!(evicted, remaining = limiter.tracked_clients(), "Pruned rate limit windows");
                }
            }
            _ = shutdown.recv() => {
                tracing::debug!("Rate limit sweeper received shutdown signal, exiting loop");
                break;
            }
        }
    }
}

/// Middleware counting every request against its client's window.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<FixedWindowLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match limiter.check(&key) {
        Decision::Allowed { remaining, reset_after } => {
            let mut response = next.run(request).await;
            insert_limit_headers(response.headers_mut(), limiter.max_requests(), remaining, reset_after);
            response
        }
        Decision::Limited { reset_after } => {
            tracing::warn!(client = %key, "Rate limit exceeded");
            metrics::record_rate_limited();

            let mut response = (StatusCode::TOO_MANY_REQUESTS, LIMITED_BODY).into_response();
            let headers = response.headers_mut();
            insert_limit_headers(headers, limiter.max_requests(), 0, reset_after);
            headers.insert(header::RETRY_AFTER, HeaderValue::from(ceil_secs(reset_after)));
            response
        }
    }
}

fn insert_limit_headers(headers: &mut HeaderMap, limit: u32, remaining: u32, reset_after: Duration) {
    headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(limit));
    headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(remaining));
    headers.insert(RATE_LIMIT_RESET, HeaderValue::from(ceil_secs(reset_after)));
}

fn ceil_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}
