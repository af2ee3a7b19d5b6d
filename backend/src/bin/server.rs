//! Astro API HTTP Server Binary
//!
//! Loads configuration, wires the ephemeris pipeline to the HTTP router and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin astro-server
//!
//! # Custom binary location and a 30 second deadline per invocation
//! EPHEMERIS_BINARY=/opt/swisseph/swetest EPHEMERIS_TIMEOUT_SECS=30 \
//!   cargo run --bin astro-server
//! ```
//!
//! # Environment Variables
//!
//! - `ASTRO_API_CONFIG`: Path to a TOML config file (default: search for `astro-api.toml`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `EPHEMERIS_BINARY`: Ephemeris executable (default: swetest)
//! - `EPHEMERIS_TIMEOUT_SECS`: Deadline per invocation (default: none)
//! - `RATE_LIMIT_MAX` / `RATE_LIMIT_WINDOW_SECS`: Rate limit (default: 300 per 24h)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use astro_api::config::AppConfig;
use astro_api::ephemeris::query::BuildOptions;
use astro_api::ephemeris::{EphemerisService, SystemExecutor};
use astro_api::http::limiter::FixedWindowLimiter;
use astro_api::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Astro API HTTP Server");

    let config = AppConfig::load()?;
    info!(
        binary = %config.ephemeris.binary,
        timeout_secs = ?config.ephemeris.timeout_secs,
        "Configuration loaded"
    );

    let executor = SystemExecutor::new().with_timeout(config.ephemeris.timeout());
    let service = EphemerisService::new(Arc::new(executor), config.ephemeris.binary.clone())
        .with_options(BuildOptions {
            suppress_header: config.ephemeris.suppress_header,
        });

    let mut state = AppState::new(service);
    if config.rate_limit.enabled {
        info!(
            max_requests = config.rate_limit.max_requests,
            window_secs = config.rate_limit.window_secs,
            "Rate limiting enabled"
        );
        state = state.with_limiter(Arc::new(FixedWindowLimiter::new(
            config.rate_limit.max_requests,
            config.rate_limit.window(),
        )));
    }

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{}", addr);
    info!("Endpoint reference: http://{}/options", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
