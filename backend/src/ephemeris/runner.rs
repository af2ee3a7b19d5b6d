//! Execution of the external ephemeris binary.
//!
//! The [`ProcessExecutor`] trait is the seam between the pipeline and the
//! operating system. [`SystemExecutor`] spawns real processes; tests swap in
//! an executor that returns canned output.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStdout, Command};
use tokio::task::JoinHandle;

use super::error::{EphemerisError, EphemerisResult, ExitStatus};
use super::query::QuerySpec;

/// Captured result of one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub status: ExitStatus,
}

/// Capability to run a binary with an argument vector and capture stdout.
///
/// Implementations report launch and I/O failures as errors and leave the
/// interpretation of the exit status to [`run_query`].
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    async fn execute(&self, binary: &str, args: &[String]) -> EphemerisResult<ProcessOutput>;
}

/// Spawns the binary with `tokio::process`.
///
/// Stdout is drained by a separate task into a shared buffer, so whatever
/// the process wrote is still available when the read fails or the
/// deadline kills it.
#[derive(Debug, Clone, Default)]
pub struct SystemExecutor {
    timeout: Option<Duration>,
}

type Captured = Arc<Mutex<Vec<u8>>>;

impl SystemExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the child and fail with [`EphemerisError::ProcessTimeout`] after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProcessExecutor for SystemExecutor {
    async fn execute(&self, binary: &str, args: &[String]) -> EphemerisResult<ProcessOutput> {
        let mut child = Command::new(binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EphemerisError::ProcessStart {
                binary: binary.to_string(),
                source,
            })?;

        let captured: Captured = Arc::default();
        let reader = child
            .stdout
            .take()
            .map(|stdout| tokio::spawn(drain(stdout, Arc::clone(&captured))));
        let reader_abort = reader.as_ref().map(JoinHandle::abort_handle);

        let finished = match self.timeout {
            Some(after) => {
                let result = tokio::time::timeout(after, wait_for(&mut child, reader)).await;
                match result {
                    Ok(finished) => finished,
                    Err(_) => {
                        // A grandchild may still hold the pipe open, so stop reading too.
                        if let Some(abort) = reader_abort {
                            abort.abort();
                        }
                        if let Err(e) = child.start_kill() {
                            log::debug!("failed to kill '{}' after timeout: {}", binary, e);
                        }
                        return Err(EphemerisError::ProcessTimeout {
                            binary: binary.to_string(),
                            after,
                            stdout: captured_text(&captured),
                        });
                    }
                }
            }
            None => wait_for(&mut child, reader).await,
        };

        let status = finished.map_err(|source| EphemerisError::ProcessIo {
            binary: binary.to_string(),
            source,
            stdout: captured_text(&captured),
        })?;

        Ok(ProcessOutput {
            stdout: captured_text(&captured),
            status: status.into(),
        })
    }
}

/// Copy stdout into `captured` chunk by chunk until EOF.
async fn drain(mut stdout: ChildStdout, captured: Captured) -> std::io::Result<()> {
    let mut chunk = [0u8; 4096];
    loop {
        let read = stdout.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        captured.lock().extend_from_slice(&chunk[..read]);
    }
}

/// Wait for stdout to close, then for the child to exit.
async fn wait_for(
    child: &mut Child,
    reader: Option<JoinHandle<std::io::Result<()>>>,
) -> std::io::Result<std::process::ExitStatus> {
    if let Some(reader) = reader {
        reader.await.map_err(std::io::Error::other)??;
    }
    child.wait().await
}

fn captured_text(captured: &Mutex<Vec<u8>>) -> String {
    String::from_utf8_lossy(&captured.lock()).into_owned()
}

/// Run one query and return the captured stdout of a successful exit.
///
/// A non-zero exit keeps the partial stdout inside the error.
pub async fn run_query(
    executor: &dyn ProcessExecutor,
    binary: &str,
    query: &QuerySpec,
) -> EphemerisResult<String> {
    let args = query.args();
    log::debug!("running {} {}", binary, args.join(" "));

    let output = executor.execute(binary, &args).await?;
    if !output.status.success() {
        log::warn!(
            "{} query failed: '{}' {} ({} bytes captured)",
            query.kind,
            binary,
            output.status,
            output.stdout.len()
        );
        return Err(EphemerisError::ProcessExit {
            binary: binary.to_string(),
            status: output.status,
            stdout: output.stdout,
        });
    }

    log::debug!("{} query returned {} bytes", query.kind, output.stdout.len());
    Ok(output.stdout)
}
