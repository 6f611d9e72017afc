//! Invocation request and result types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ffi::OsString;

/// Flag that asks the external tool for structured output.
pub const JSON_FLAG: &str = "--json";

/// How the child process' standard streams are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdioMode {
    /// Child shares the caller's terminal; only the exit code is observed
    Inherit,
    /// Child output is piped and accumulated
    #[default]
    Pipe,
}

/// Options recognized for a single invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvocationOptions {
    #[serde(default)]
    pub stdio: StdioMode,
    #[serde(default)]
    pub json: bool,
}

impl InvocationOptions {
    #[must_use]
    pub fn captured() -> Self {
        Self {
            stdio: StdioMode::Pipe,
            json: false,
        }
    }

    #[must_use]
    pub fn inherited() -> Self {
        Self {
            stdio: StdioMode::Inherit,
            json: false,
        }
    }

    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// A logical call into the external tool
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvocationRequest {
    pub args: Vec<OsString>,
    pub options: InvocationOptions,
}

impl InvocationRequest {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            options: InvocationOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: InvocationOptions) -> Self {
        self.options = options;
        self
    }

    /// Arguments as passed to the child, with `--json` appended in JSON mode
    #[must_use]
    pub fn effective_args(&self) -> Vec<OsString> {
        let mut args = self.args.clone();
        if self.options.json {
            args.push(JSON_FLAG.into());
        }
        args
    }
}

/// Standard output of a finished invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stdout {
    Text(String),
    Json(Value),
}

impl Stdout {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

impl Default for Stdout {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Outcome of an invocation that reached the external tool.
///
/// `code == Some(0)` is the only success signal. `code` is `None` when the
/// child was terminated without an exit status (for example by a signal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub code: Option<i32>,
    pub stdout: Stdout,
    pub stderr: String,
}

impl InvocationResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Failure details when the tool reported an error, `None` on success
    #[must_use]
    pub fn failure(&self) -> Option<ToolFailure> {
        if self.is_success() {
            return None;
        }

        let mut context = match &self.stdout {
            Stdout::Json(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        let message = match context.remove("error") {
            Some(Value::String(message)) => Some(message),
            Some(other) => {
                context.insert("error".to_string(), other);
                None
            }
            None => None,
        };

        Some(ToolFailure {
            code: self.code,
            message,
            context,
            stderr: self.stderr.clone(),
        })
    }
}

/// The external tool's own failure report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    pub code: Option<i32>,
    /// `error` field of a structured failure payload
    pub message: Option<String>,
    /// Remaining payload fields, e.g. `filePath`
    pub context: Map<String, Value>,
    pub stderr: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_effective_args_appends_json_flag_last() {
        let request = InvocationRequest::new(["inspect", "schema.json"])
            .with_options(InvocationOptions::captured().with_json(true));
        assert_eq!(
            request.effective_args(),
            vec!["inspect", "schema.json", "--json"]
        );

        let request = InvocationRequest::new(["--version"]);
        assert_eq!(request.effective_args(), vec!["--version"]);
    }

    #[test]
    fn test_failure_splits_structured_payload() {
        let result = InvocationResult {
            code: Some(1),
            stdout: Stdout::Json(json!({
                "error": "No such file or directory",
                "filePath": "/nonexistent/path.json"
            })),
            stderr: String::new(),
        };

        let failure = result.failure().unwrap();
        assert_eq!(failure.code, Some(1));
        assert_eq!(failure.message.as_deref(), Some("No such file or directory"));
        assert_eq!(
            failure.context.get("filePath"),
            Some(&json!("/nonexistent/path.json"))
        );
    }

    #[test]
    fn test_success_has_no_failure() {
        let result = InvocationResult {
            code: Some(0),
            stdout: Stdout::Text("error: this text does not matter\n".into()),
            stderr: String::new(),
        };
        assert!(result.is_success());
        assert!(result.failure().is_none());
    }

    #[test]
    fn test_abnormal_termination_is_failure() {
        let result = InvocationResult {
            code: None,
            stdout: Stdout::default(),
            stderr: "killed".into(),
        };
        let failure = result.failure().unwrap();
        assert_eq!(failure.code, None);
        assert!(failure.message.is_none());
        assert_eq!(failure.stderr, "killed");
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: InvocationOptions = serde_json::from_str(r#"{"json": true}"#).unwrap();
        assert_eq!(options.stdio, StdioMode::Pipe);
        assert!(options.json);

        let options: InvocationOptions = serde_json::from_str(r#"{"stdio": "inherit"}"#).unwrap();
        assert_eq!(options, InvocationOptions::inherited());
    }
}
