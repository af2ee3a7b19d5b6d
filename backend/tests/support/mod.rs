#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use astro_api::ephemeris::{EphemerisResult, ExitStatus, ProcessExecutor, ProcessOutput};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Canned response for invocations whose arguments contain `needle`.
#[derive(Clone)]
pub struct Script {
    pub needle: String,
    pub stdout: String,
    pub status: ExitStatus,
}

/// Executor returning canned output and recording every call.
#[derive(Default)]
pub struct FakeExecutor {
    scripts: Vec<Script>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer calls containing `needle` with `stdout` and a zero exit.
    pub fn respond(self, needle: &str, stdout: &str) -> Self {
        self.respond_with(needle, stdout, ExitStatus::Code(0))
    }

    pub fn respond_with(mut self, needle: &str, stdout: &str, status: ExitStatus) -> Self {
        self.scripts.push(Script {
            needle: needle.to_string(),
            stdout: stdout.to_string(),
            status,
        });
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ProcessExecutor for FakeExecutor {
    async fn execute(&self, binary: &str, args: &[String]) -> EphemerisResult<ProcessOutput> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((binary.to_string(), args.to_vec()));

        let script = self
            .scripts
            .iter()
            .find(|s| args.iter().any(|a| a.contains(&s.needle)));
        Ok(match script {
            Some(s) => ProcessOutput {
                stdout: s.stdout.clone(),
                status: s.status,
            },
            None => ProcessOutput {
                stdout: String::new(),
                status: ExitStatus::Code(0),
            },
        })
    }
}

pub const PLANETS_OUTPUT: &str = "\
Sun          \",\"344.5906126\",\"  0.0001298\",\"  1.0042618
Moon         \",\" 27.8136583\",\" -4.1766390\",\" 12.0453197
Mercury      \",\"325.5466052\",\" -1.6658766\",\"  1.5797183
";

pub const HOUSES_OUTPUT: &str = "\
\"1\",\" 98.6612\"
\"2\",\"118.4031\"
\"3\",\"141.2090\"
";

pub const SIRIUS_OUTPUT: &str =
    "\"Sirius\",\"alCMa\",104.0799,-39.6049,0.0001,7.1802,543103.6,\"-1.46m\"\n";

pub const POLARIS_OUTPUT: &str =
    "\"Polaris\",\"alUMi\",88.5750,66.0982,0.0001,4.0122,28015612.5,\"1.97m\"\n";
