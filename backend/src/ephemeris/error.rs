//! Error types for the ephemeris pipeline.
//!
//! Every variant names the stage that failed so the HTTP layer can map it
//! to a status code without inspecting message text.

use std::time::Duration;

use super::records::RecordKind;

/// Result type for pipeline operations.
pub type EphemerisResult<T> = Result<T, EphemerisError>;

/// Failure of one stage of the normalize → build → run → parse pipeline.
#[derive(Debug, thiserror::Error)]
pub enum EphemerisError {
    /// The birthdate matched none of the accepted patterns.
    #[error("invalid birthdate '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// A user value cannot be placed into the flag string.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The binary could not be launched.
    #[error("failed to start '{binary}': {source}")]
    ProcessStart {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// Standard output could not be read, or waiting on the child failed.
    /// `stdout` keeps whatever was read before the failure.
    #[error("failed to read output of '{binary}': {source}")]
    ProcessIo {
        binary: String,
        #[source]
        source: std::io::Error,
        stdout: String,
    },

    /// The process exited unsuccessfully. `stdout` keeps whatever was captured.
    #[error("'{binary}' {status}")]
    ProcessExit {
        binary: String,
        status: ExitStatus,
        stdout: String,
    },

    /// The process outlived the configured deadline and was killed.
    /// `stdout` keeps whatever was read before the deadline.
    #[error("'{binary}' did not finish within {}s", .after.as_secs_f64())]
    ProcessTimeout {
        binary: String,
        after: Duration,
        stdout: String,
    },

    /// A comma line had the wrong number of fields.
    #[error("malformed {kind} output line ({found} fields, expected {expected}): {line}")]
    MalformedLine {
        kind: RecordKind,
        line: String,
        expected: usize,
        found: usize,
    },

    /// One star of a batch failed; the whole batch is discarded.
    #[error("star '{star}': {source}")]
    StarQuery {
        star: String,
        #[source]
        source: Box<EphemerisError>,
    },
}

impl EphemerisError {
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True when the caller supplied bad input rather than the environment failing.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidDate { .. } | Self::InvalidParameter { .. } => true,
            Self::StarQuery { source, .. } => source.is_client_error(),
            _ => false,
        }
    }

    /// The innermost error, unwrapping star batch context.
    pub fn root(&self) -> &EphemerisError {
        match self {
            Self::StarQuery { source, .. } => source.root(),
            other => other,
        }
    }

    /// Output the process wrote before it failed, if any was captured.
    pub fn captured_stdout(&self) -> Option<&str> {
        match self.root() {
            Self::ProcessIo { stdout, .. }
            | Self::ProcessExit { stdout, .. }
            | Self::ProcessTimeout { stdout, .. } => Some(stdout),
            _ => None,
        }
    }
}

/// How an external process ended, as reported by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Exited with a code.
    Code(i32),
    /// Killed by a signal, or no code was available.
    Signaled,
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        matches!(self, ExitStatus::Code(0))
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitStatus::Code(code) => write!(f, "exited with status {}", code),
            ExitStatus::Signaled => write!(f, "was terminated by a signal"),
        }
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitStatus::Code(code),
            None => ExitStatus::Signaled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_query_client_error_follows_source() {
        let err = EphemerisError::StarQuery {
            star: "Sirius".to_string(),
            source: Box::new(EphemerisError::invalid_parameter("stars", "contains whitespace")),
        };
        assert!(err.is_client_error());
        assert!(matches!(err.root(), EphemerisError::InvalidParameter { .. }));
    }

    #[test]
    fn test_captured_stdout_survives_star_context() {
        let err = EphemerisError::StarQuery {
            star: "Polaris".to_string(),
            source: Box::new(EphemerisError::ProcessTimeout {
                binary: "swetest".to_string(),
                after: Duration::from_secs(1),
                stdout: "\"Polaris\",\"alUMi\"".to_string(),
            }),
        };
        assert_eq!(err.captured_stdout(), Some("\"Polaris\",\"alUMi\""));

        let invalid = EphemerisError::invalid_parameter("stars", "empty");
        assert_eq!(invalid.captured_stdout(), None);
    }

    #[test]
    fn test_exit_status_display() {
        assert_eq!(ExitStatus::Code(2).to_string(), "exited with status 2");
        assert!(!ExitStatus::Signaled.success());
        assert!(ExitStatus::Code(0).success());
    }

    #[test]
    fn test_malformed_line_message_contains_line() {
        let err = EphemerisError::MalformedLine {
            kind: RecordKind::Houses,
            line: "\"1\",2,3".to_string(),
            expected: 2,
            found: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("houses"));
        assert!(msg.contains("\"1\",2,3"));
    }
}
