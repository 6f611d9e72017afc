//! Result adaptation for finished invocations

use jslaunch_errors::InvokeError;
use jslaunch_platform::CommandOutput;
use jslaunch_types::{InvocationResult, Stdout};
use serde_json::Value;

/// Assemble the result of a captured run.
///
/// With `json` set, stdout is decoded whatever the exit code, since the tool
/// reports its own failures as a JSON object on stdout.
///
/// # Errors
///
/// Returns [`InvokeError::DecodeFailed`] when `json` is set and stdout is not
/// a JSON document. The text is never passed through in that case.
pub fn adapt(output: CommandOutput, json: bool) -> Result<InvocationResult, InvokeError> {
    let CommandOutput {
        code,
        stdout,
        stderr,
    } = output;

    let stdout = if json {
        let value: Value =
            serde_json::from_str(&stdout).map_err(|e| InvokeError::decode(code, &e, &stdout))?;
        Stdout::Json(value)
    } else {
        Stdout::Text(stdout)
    };

    Ok(InvocationResult {
        code,
        stdout,
        stderr,
    })
}

/// Result of an inherited run: the streams went to the caller's terminal
#[must_use]
pub fn exit_only(code: Option<i32>) -> InvocationResult {
    InvocationResult {
        code,
        stdout: Stdout::default(),
        stderr: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn output(code: Option<i32>, stdout: &str, stderr: &str) -> CommandOutput {
        CommandOutput {
            code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_text_passes_through_unchanged() {
        let result = adapt(output(Some(2), "  raw\ntext \n", "oops\n"), false).unwrap();
        assert_eq!(result.code, Some(2));
        assert_eq!(result.stdout, Stdout::Text("  raw\ntext \n".into()));
        assert_eq!(result.stderr, "oops\n");
    }

    #[test]
    fn test_json_decoded_on_failure_exit() {
        let result = adapt(
            output(
                Some(1),
                "{\"error\":\"No such file or directory\",\"filePath\":\"/x.json\"}\n",
                "",
            ),
            true,
        )
        .unwrap();

        assert_eq!(
            result.stdout,
            Stdout::Json(json!({
                "error": "No such file or directory",
                "filePath": "/x.json"
            }))
        );
        assert!(!result.is_success());
    }

    #[test]
    fn test_plain_text_in_json_mode_is_decode_error() {
        let err = adapt(output(Some(1), "error: unknown command\n", ""), true).unwrap_err();
        match err {
            InvokeError::DecodeFailed { code, excerpt, .. } => {
                assert_eq!(code, Some(1));
                assert_eq!(excerpt, "error: unknown command\n");
            }
        }
    }

    #[test]
    fn test_empty_stdout_in_json_mode_is_decode_error() {
        assert!(adapt(output(Some(0), "", ""), true).is_err());
    }

    #[test]
    fn test_exit_only_has_empty_streams() {
        let result = exit_only(Some(0));
        assert!(result.is_success());
        assert_eq!(result.stdout.as_text(), Some(""));
        assert!(result.stderr.is_empty());
    }
}
