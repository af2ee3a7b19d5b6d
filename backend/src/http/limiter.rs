//! Request rate limiting.
//!
//! Handlers never talk to the limiter directly; the [`rate_limit`]
//! middleware consults whatever [`RateLimiter`] the state carries, keyed by
//! `client-ip#path`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use parking_lot::Mutex;

use super::error::AppError;
use super::state::AppState;

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

/// Policy deciding whether a request may proceed.
pub trait RateLimiter: Send + Sync {
    fn check(&self, key: &str) -> RateDecision;
}

/// Entries kept before expired windows are swept.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Default)]
struct Windows {
    by_key: HashMap<String, Window>,
    last_sweep: Option<Instant>,
}

/// Allows `max_requests` per key in each fixed window.
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    sweep_threshold: usize,
    windows: Mutex<Windows>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            sweep_threshold: SWEEP_THRESHOLD,
            windows: Mutex::new(Windows::default()),
        }
    }

    /// Number of tracked keys at which expired windows start being swept.
    pub fn with_sweep_threshold(mut self, threshold: usize) -> Self {
        self.sweep_threshold = threshold;
        self
    }

    /// Check against an explicit clock.
    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut guard = self.windows.lock();
        let state = &mut *guard;

        // At most one sweep per window; entries cannot expire any faster.
        let sweep_due = state
            .last_sweep
            .map_or(true, |last| now.duration_since(last) >= self.window);
        if state.by_key.len() >= self.sweep_threshold && sweep_due {
            let window = self.window;
            state
                .by_key
                .retain(|_, w| now.duration_since(w.started) < window);
            state.last_sweep = Some(now);
        }

        let windows = &mut state.by_key;
        let entry = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        if entry.count >= self.max_requests {
            let elapsed = now.duration_since(entry.started);
            return RateDecision::Limited {
                retry_after: self.window.saturating_sub(elapsed),
            };
        }

        entry.count += 1;
        RateDecision::Allowed {
            remaining: self.max_requests - entry.count,
        }
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().by_key.len()
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }
}

/// Key for a request: client address plus path.
pub fn request_key(request: &Request) -> String {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!("{}#{}", client, request.uri().path())
}

/// Middleware rejecting requests the configured limiter refuses.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(limiter) = state.limiter.as_ref() else {
        return next.run(request).await;
    };

    let key = request_key(&request);
    match limiter.check(&key) {
        RateDecision::Allowed { .. } => next.run(request).await,
        RateDecision::Limited { retry_after } => {
            tracing::warn!(key = %key, "rate limit exceeded");
            AppError::RateLimited { retry_after }.into_response()
        }
    }
}
