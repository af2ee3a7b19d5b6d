//! HTTP error handling and response types.

use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::ephemeris::EphemerisError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (missing parameter)
    BadRequest(String),
    /// Client exceeded its request budget
    RateLimited { retry_after: Duration },
    /// Pipeline failure
    Ephemeris(EphemerisError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Ephemeris(e) => match e.root() {
                EphemerisError::InvalidDate { .. } | EphemerisError::InvalidParameter { .. } => {
                    StatusCode::BAD_REQUEST
                }
                EphemerisError::ProcessTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// Stable error code for a pipeline failure.
pub fn ephemeris_error_code(err: &EphemerisError) -> &'static str {
    match err.root() {
        EphemerisError::InvalidDate { .. } => "INVALID_DATE",
        EphemerisError::InvalidParameter { .. } => "INVALID_PARAMETER",
        EphemerisError::ProcessStart { .. } => "PROCESS_START_ERROR",
        EphemerisError::ProcessIo { .. } => "PROCESS_IO_ERROR",
        EphemerisError::ProcessExit { .. } => "PROCESS_EXIT_ERROR",
        EphemerisError::ProcessTimeout { .. } => "PROCESS_TIMEOUT",
        EphemerisError::MalformedLine { .. } => "MALFORMED_LINE",
        EphemerisError::StarQuery { .. } => "STAR_QUERY_ERROR",
    }
}

fn ephemeris_details(err: &EphemerisError) -> Option<String> {
    let mut parts = Vec::new();
    if let EphemerisError::StarQuery { star, .. } = err {
        parts.push(format!("star={}", star));
    }
    if let EphemerisError::MalformedLine { line, .. } = err.root() {
        parts.push(format!("line={}", line));
    }
    (!parts.is_empty()).then(|| parts.join("; "))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::BadRequest(msg) => {
                (status, Json(ApiError::new("BAD_REQUEST", msg))).into_response()
            }
            AppError::RateLimited { retry_after } => {
                let secs = retry_after.as_secs().max(1);
                let error = ApiError::new(
                    "RATE_LIMITED",
                    format!("Too many requests, retry in {} seconds", secs),
                );
                (status, [(header::RETRY_AFTER, secs.to_string())], Json(error)).into_response()
            }
            AppError::Ephemeris(e) => {
                let mut error = ApiError::new(ephemeris_error_code(&e), e.to_string());
                if let Some(details) = ephemeris_details(&e) {
                    error = error.with_details(details);
                }
                (status, Json(error)).into_response()
            }
        }
    }
}

impl From<EphemerisError> for AppError {
    fn from(err: EphemerisError) -> Self {
        AppError::Ephemeris(err)
    }
}
