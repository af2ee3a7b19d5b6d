//! HTTP server module.
//!
//! An axum router in front of the ephemeris pipeline. The handlers are thin:
//! they turn query parameters into pipeline requests and pipeline errors into
//! JSON error bodies.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parameter extraction                             │
//! │  - Rate limiting, CORS, compression, tracing              │
//! │  - Error → status code mapping                            │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Ephemeris pipeline (crate::ephemeris)                    │
//! │  - Date normalization, flag strings                       │
//! │  - Process execution, output parsing                      │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
