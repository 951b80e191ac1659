//! Sandboxed runner: one interpreter process per grading run, bounded by a
//! wall-clock timeout.

use std::{
    process::Stdio,
    time::{Duration, Instant},
};

use tokio::time::timeout;
use tracing::{info, warn};

use crate::{
    config::Config,
    error::GradeError,
    execution::ExecutionResult,
    notebook::ExtractedProgram,
};

pub mod python;

#[derive(Debug, Clone)]
pub struct Runner {
    interpreter: String,
    timeout: Duration,
}

impl Runner {
    pub fn new(interpreter: impl Into<String>, timeout: Duration) -> Self {
        Self { interpreter: interpreter.into(), timeout }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.interpreter(), cfg.execution_timeout())
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the configured interpreter can be launched at all.
    pub async fn is_available(&self) -> bool {
        tokio::process::Command::new(&self.interpreter)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .is_ok()
    }

    /// Run the program once. Never retried; every fault comes back as
    /// `ExecutionResult::Failure`.
    pub async fn run(&self, program: &ExtractedProgram) -> ExecutionResult {
        match self.try_run(program).await {
            Ok(stdout) => ExecutionResult::success(stdout),
            Err(err) => {
                let message = err.to_string();
                warn!(error = %first_line(&message), "execution failed");
                err.into()
            }
        }
    }

    async fn try_run(&self, program: &ExtractedProgram) -> Result<String, GradeError> {
        let started = Instant::now();
        let child = python::command(&self.interpreter, program)
            .spawn()
            .map_err(GradeError::Launch)?;
        info!(
            interpreter = %self.interpreter,
            pid = child.id().unwrap_or_default(),
            timeout_secs = self.timeout.as_secs(),
            "process started"
        );

        // Dropping the future on timeout drops the child, and kill_on_drop
        // terminates it. Partial output is discarded with it.
        let out = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(res) => res.map_err(GradeError::Launch)?,
            Err(_) => return Err(GradeError::ExecutionTimeout(self.timeout)),
        };

        info!(
            status = %out.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            stdout_bytes = out.stdout.len(),
            stderr_bytes = out.stderr.len(),
            "process finished"
        );

        if !out.status.success() {
            return Err(GradeError::ExecutionFailed {
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or_default()
}
