//! Events emitted while resolving and running the external executable

use serde::{Deserialize, Serialize};

use super::FailureContext;

/// How the child's standard streams were wired for an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdioDisposition {
    Captured,
    Inherited,
}

/// Platform operation events for tracking the launch pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PlatformEvent {
    /// The executable for the host platform was found
    ExecutableResolved {
        /// Canonical pair, e.g. `darwin-arm64`
        platform: String,
        path: String,
    },

    /// Quarantine attribute removal is about to run (macOS only)
    QuarantineClearStarted { utility: String, binary_path: String },

    /// Quarantine attribute removal finished. Failures here never abort the
    /// launch; they are reported for diagnostics only.
    QuarantineClearFinished {
        binary_path: String,
        exit_code: Option<i32>,
        error: Option<String>,
    },

    /// Process execution started
    ProcessExecutionStarted {
        command: String,
        args: Vec<String>,
        stdio: StdioDisposition,
    },

    /// Process exited; a non-zero code still lands here
    ProcessExecutionCompleted {
        command: String,
        exit_code: Option<i32>,
        duration_ms: u64,
        stdout_bytes: usize,
        stderr_bytes: usize,
    },

    /// Process could not be spawned or awaited
    ProcessExecutionFailed {
        command: String,
        failure: FailureContext,
        duration_ms: u64,
    },
}

impl PlatformEvent {
    /// Whether this event reports a degraded but non-fatal outcome
    #[must_use]
    pub fn is_warning(&self) -> bool {
        match self {
            Self::QuarantineClearFinished {
                exit_code, error, ..
            } => error.is_some() || *exit_code != Some(0),
            _ => false,
        }
    }
}
