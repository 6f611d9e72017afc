//! Native process operations implementation
//!
//! Spawns real child processes through `tokio::process`, emitting platform
//! events around each execution.

use async_trait::async_trait;
use jslaunch_errors::PlatformError;
use jslaunch_events::{EventEmitter, FailureContext, PlatformEvent, StdioDisposition};
use std::convert::TryFrom;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::core::PlatformContext;
use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};

/// Keeps the child from opening a console window on Windows.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Process operations backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeProcessOperations;

impl NativeProcessOperations {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(windows)]
fn hide_console_window(command: &mut Command) {
    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_command: &mut Command) {}

fn build_command(cmd: &PlatformCommand) -> Command {
    let mut command = Command::new(cmd.program());
    command.args(cmd.get_args());
    hide_console_window(&mut command);
    command
}

fn spawn_failed(cmd: &PlatformCommand, err: &std::io::Error) -> PlatformError {
    PlatformError::SpawnFailed {
        program: cmd.display_name(),
        message: err.to_string(),
    }
}

fn execution_failed(cmd: &PlatformCommand, err: &std::io::Error) -> PlatformError {
    PlatformError::ProcessExecutionFailed {
        command: cmd.display_name(),
        message: err.to_string(),
    }
}

/// Read a child stream to the end
async fn drain<R>(stream: Option<R>) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut collected = Vec::new();
    if let Some(mut stream) = stream {
        stream.read_to_end(&mut collected).await?;
    }
    Ok(collected)
}

fn emit_started(ctx: &PlatformContext, cmd: &PlatformCommand, stdio: StdioDisposition) {
    ctx.emit_platform(PlatformEvent::ProcessExecutionStarted {
        command: cmd.display_name(),
        args: cmd.display_args(),
        stdio,
    });
}

fn emit_completed(
    ctx: &PlatformContext,
    cmd: &PlatformCommand,
    exit_code: Option<i32>,
    duration: Duration,
    output: Option<&CommandOutput>,
) {
    ctx.emit_platform(PlatformEvent::ProcessExecutionCompleted {
        command: cmd.display_name(),
        exit_code,
        duration_ms: duration_to_millis(duration),
        stdout_bytes: output.map_or(0, |o| o.stdout.len()),
        stderr_bytes: output.map_or(0, |o| o.stderr.len()),
    });
}

fn emit_failed(ctx: &PlatformContext, cmd: &PlatformCommand, error: &PlatformError, duration: Duration) {
    ctx.emit_platform(PlatformEvent::ProcessExecutionFailed {
        command: cmd.display_name(),
        failure: FailureContext::from_error(error),
        duration_ms: duration_to_millis(duration),
    });
}

#[async_trait]
impl ProcessOperations for NativeProcessOperations {
    async fn run_captured(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, PlatformError> {
        let start = Instant::now();
        emit_started(ctx, &cmd, StdioDisposition::Captured);

        let result: Result<CommandOutput, PlatformError> = async {
            let mut command = build_command(&cmd);
            command
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let mut child = command.spawn().map_err(|e| spawn_failed(&cmd, &e))?;
            let stdout = child.stdout.take();
            let stderr = child.stderr.take();

            // Both pipes are drained while waiting so a chatty child cannot
            // block on a full pipe buffer.
            let (stdout, stderr, status) =
                tokio::try_join!(drain(stdout), drain(stderr), child.wait())
                    .map_err(|e| execution_failed(&cmd, &e))?;

            Ok(CommandOutput {
                code: status.code(),
                stdout: String::from_utf8_lossy(&stdout).into_owned(),
                stderr: String::from_utf8_lossy(&stderr).into_owned(),
            })
        }
        .await;

        let duration = start.elapsed();
        match &result {
            Ok(output) => emit_completed(ctx, &cmd, output.code, duration, Some(output)),
            Err(e) => emit_failed(ctx, &cmd, e, duration),
        }

        result
    }

    async fn run_inherited(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<Option<i32>, PlatformError> {
        let start = Instant::now();
        emit_started(ctx, &cmd, StdioDisposition::Inherited);

        let result: Result<Option<i32>, PlatformError> = async {
            let mut command = build_command(&cmd);
            command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());

            let mut child = command.spawn().map_err(|e| spawn_failed(&cmd, &e))?;
            let status = child.wait().await.map_err(|e| execution_failed(&cmd, &e))?;
            Ok(status.code())
        }
        .await;

        let duration = start.elapsed();
        match &result {
            Ok(code) => emit_completed(ctx, &cmd, *code, duration, None),
            Err(e) => emit_failed(ctx, &cmd, e, duration),
        }

        result
    }
}
