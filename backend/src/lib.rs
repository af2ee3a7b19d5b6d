//! # Astro API
//!
//! HTTP front end for the Swiss Ephemeris `swetest` command-line tool.
//!
//! The crate turns query parameters into `swetest` invocations and the tool's
//! comma-separated output into JSON: planet positions, house cusps and fixed
//! star data.
//!
//! ## Architecture
//!
//! - [`ephemeris`]: the pipeline. Date normalization, flag string
//!   construction, process execution and output parsing. No HTTP types.
//! - [`config`]: TOML and environment configuration.
//! - [`http`]: Axum router, handlers and rate limiting (feature `http-server`).
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use astro_api::ephemeris::{ChartRequest, EphemerisService, SystemExecutor};
//!
//! # async fn example() -> Result<(), astro_api::ephemeris::EphemerisError> {
//! let service = EphemerisService::new(Arc::new(SystemExecutor::new()), "swetest");
//! let planets = service
//!     .planets(&ChartRequest {
//!         birthdate: "05/03/1990".into(),
//!         utctime: "14:30".into(),
//!         latitude: "52.52".into(),
//!         longitude: "13.40".into(),
//!         altitude: "34".into(),
//!         housesystem: "P".into(),
//!     })
//!     .await?;
//! println!("{} bodies", planets.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ephemeris;

#[cfg(feature = "http-server")]
pub mod http;
