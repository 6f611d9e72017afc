//! CLI error handling

use std::fmt;

use jslaunch_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(jslaunch_errors::Error),
    /// Failure while locating or starting the jsonschema binary
    Launch(jslaunch_errors::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e.user_message()),
            CliError::Launch(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) | CliError::Launch(e) => Some(e),
        }
    }
}

impl From<jslaunch_errors::Error> for CliError {
    fn from(e: jslaunch_errors::Error) -> Self {
        match e {
            jslaunch_errors::Error::Config(_) => CliError::Config(e),
            other => CliError::Launch(other),
        }
    }
}
