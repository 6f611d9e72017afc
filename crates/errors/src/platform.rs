//! Platform-specific operation errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Where users are pointed when no binary ships for their platform.
pub const ISSUE_TRACKER_URL: &str = "https://github.com/sourcemeta/jsonschema";

/// Errors that can occur while locating or starting the external executable
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    /// No binary exists for this host. `os` and `arch` are the raw values the
    /// host reported, not the canonical ones used to build the file name.
    #[error(
        "The JSON Schema CLI does not support {os} for {arch} yet. \
         Please open a GitHub issue at {url}",
        url = ISSUE_TRACKER_URL
    )]
    UnsupportedPlatform {
        os: String,
        arch: String,
        expected_path: String,
    },

    #[error("failed to spawn {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("process execution failed: {command} - {message}")]
    ProcessExecutionFailed { command: String, message: String },
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedPlatform { .. } => None,
            Self::SpawnFailed { .. } => {
                Some("Check that the executable exists and has execute permission.")
            }
            Self::ProcessExecutionFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::UnsupportedPlatform { .. } => "platform.unsupported",
            Self::SpawnFailed { .. } => "platform.spawn_failed",
            Self::ProcessExecutionFailed { .. } => "platform.process_failed",
        })
    }
}
