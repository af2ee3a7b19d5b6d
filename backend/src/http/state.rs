//! Application state for the HTTP server.

use std::sync::Arc;

use super::limiter::RateLimiter;
use crate::ephemeris::EphemerisService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Pipeline used by the `/run-*` endpoints
    pub service: EphemerisService,
    /// Request policy consulted before the pipeline runs; `None` disables limiting
    pub limiter: Option<Arc<dyn RateLimiter>>,
}

impl AppState {
    /// Create application state without rate limiting.
    pub fn new(service: EphemerisService) -> Self {
        Self {
            service,
            limiter: None,
        }
    }

    pub fn with_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }
}
