//! Provisioner port - the external Terraform binary
//!
//! Every call runs with the workspace `terraform/` directory as cwd.

use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use thiserror::Error;

use crate::domain::value_objects::LifecycleStep;

/// Captured result of a finished tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug, Error)]
pub enum ProvisionerError {
    #[error("{program} could not be started: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("lost track of {program}: {message}")]
    Wait { program: String, message: String },
}

pub type ProvisionerResult<T> = Result<T, ProvisionerError>;

/// A lifecycle step running in the background
///
/// Completion arrives over a channel from the waiter thread; callers poll
/// with [`PendingStep::wait_timeout`] to refresh progress between ticks.
pub struct PendingStep {
    program: String,
    rx: Receiver<ProvisionerResult<ToolOutput>>,
}

impl PendingStep {
    pub fn new(program: impl Into<String>, rx: Receiver<ProvisionerResult<ToolOutput>>) -> Self {
        Self {
            program: program.into(),
            rx,
        }
    }

    /// A step that has already finished
    pub fn finished(program: impl Into<String>, result: ProvisionerResult<ToolOutput>) -> Self {
        let (tx, rx) = mpsc::channel();
        // Receiver is alive in `rx`, send cannot fail
        let _ = tx.send(result);
        Self::new(program, rx)
    }

    /// `None` while still running
    pub fn wait_timeout(&self, tick: Duration) -> Option<ProvisionerResult<ToolOutput>> {
        match self.rx.recv_timeout(tick) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(ProvisionerError::Wait {
                program: self.program.clone(),
                message: "waiter exited without reporting".to_string(),
            })),
        }
    }
}

impl std::fmt::Debug for PendingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingStep")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

pub trait Provisioner {
    /// Run a step to completion, capturing its output
    fn run(&self, step: LifecycleStep, dir: &Path) -> ProvisionerResult<ToolOutput>;

    /// Start a step without blocking
    fn spawn(&self, step: LifecycleStep, dir: &Path) -> ProvisionerResult<PendingStep>;

    /// `terraform output -raw <name>`; `None` when the output is not set
    fn output_raw(&self, dir: &Path, name: &str) -> ProvisionerResult<Option<String>>;
}
