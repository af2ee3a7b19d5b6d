//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (rate limiting, CORS,
//! compression, tracing) and creates the axum router ready for serving.

use axum::{middleware, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::limiter::rate_limit;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Only the endpoints that spawn a process are rate limited.
    let queries = Router::new()
        .route("/run-planets", get(handlers::run_planets))
        .route("/run-houses", get(handlers::run_houses))
        .route("/run-star", get(handlers::run_star))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/options", get(handlers::get_options))
        .merge(queries)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
