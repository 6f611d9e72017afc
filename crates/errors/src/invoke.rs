//! Errors raised while adapting the output of a finished invocation

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Longest stdout prefix kept inside a decode error.
const EXCERPT_LIMIT: usize = 200;

#[derive(Debug, Clone, Error)]
pub enum InvokeError {
    /// `--json` was requested but stdout did not hold a JSON document.
    #[error("failed to decode JSON output (exit code {code:?}): {message}")]
    DecodeFailed {
        code: Option<i32>,
        message: String,
        excerpt: String,
    },
}

impl InvokeError {
    /// Build a decode error, keeping a bounded excerpt of the offending output
    #[must_use]
    pub fn decode(code: Option<i32>, err: &serde_json::Error, stdout: &str) -> Self {
        let excerpt = match stdout.char_indices().nth(EXCERPT_LIMIT) {
            Some((idx, _)) => format!("{}...", &stdout[..idx]),
            None => stdout.to_string(),
        };
        Self::DecodeFailed {
            code,
            message: err.to_string(),
            excerpt,
        }
    }
}

impl UserFacingError for InvokeError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::DecodeFailed { .. } => {
                Some("The jsonschema binary emitted non-JSON output in --json mode; please report it.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::DecodeFailed { .. } => Some("invoke.decode_failed"),
        }
    }
}
