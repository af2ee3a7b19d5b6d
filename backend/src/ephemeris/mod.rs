//! Ephemeris pipeline.
//!
//! ```text
//! query parameters
//!       │  date::normalize_birthdate
//!       ▼
//! BirthMoment / ChartSite
//!       │  query::{planets,houses,star}_query
//!       ▼
//! QuerySpec (flag string)
//!       │  runner::run_query  ──►  ProcessExecutor (swetest)
//!       ▼
//! raw stdout
//!       │  parser::parse_records
//!       ▼
//! PlanetRecord / HouseRecord / StarRecord
//! ```
//!
//! Nothing here depends on the HTTP layer; [`service::EphemerisService`] can
//! be driven directly with strings and a fake executor.

pub mod date;
pub mod error;
pub mod parser;
pub mod query;
pub mod records;
pub mod runner;
pub mod service;

pub use error::{EphemerisError, EphemerisResult, ExitStatus};
pub use records::{HouseRecord, PlanetRecord, RecordKind, StarRecord};
pub use runner::{ProcessExecutor, ProcessOutput, SystemExecutor};
pub use service::{ChartRequest, EphemerisService, StarRequest};
