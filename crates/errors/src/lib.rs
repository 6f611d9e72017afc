#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for jslaunch
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone for easier handling.
//!
//! A non-zero exit of the external tool is not an error: it is returned as
//! data in the invocation result. Everything here is an infrastructure
//! failure that aborts the pipeline.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod invoke;
pub mod platform;

// Re-export all error types at the root
pub use config::ConfigError;
pub use invoke::InvokeError;
pub use platform::{PlatformError, ISSUE_TRACKER_URL};

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invoke error: {0}")]
    Invoke(#[from] InvokeError),
}

/// Result type alias for jslaunch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Platform(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Invoke(err) => err.user_message(),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Platform(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Invoke(err) => err.user_hint(),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Platform(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Invoke(err) => err.user_code(),
        }
    }
}
