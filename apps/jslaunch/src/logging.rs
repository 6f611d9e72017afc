//! Structured logging integration for events
//!
//! Library crates report progress as events. This module turns them into
//! tracing records with structured fields; the subscriber installed in
//! `main` decides what reaches stderr.

use jslaunch_events::{AppEvent, EventMessage, EventReceiver, GeneralEvent, PlatformEvent};
use tracing::{debug, error, info, warn};

/// Log every event until all senders are dropped
pub async fn forward_events(mut rx: EventReceiver) {
    while let Some(message) = rx.recv().await {
        log_event_with_tracing(&message);
    }
}

/// Log an `AppEvent` using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;

    match &message.event {
        AppEvent::Platform(platform_event) => match platform_event {
            PlatformEvent::ExecutableResolved { platform, path } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    platform = %platform,
                    path = %path,
                    "Executable resolved"
                );
            }
            PlatformEvent::QuarantineClearStarted {
                utility,
                binary_path,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    utility = %utility,
                    binary_path = %binary_path,
                    "Clearing quarantine attributes"
                );
            }
            PlatformEvent::QuarantineClearFinished {
                binary_path,
                exit_code,
                error,
            } => {
                if platform_event.is_warning() {
                    warn!(
                        source = meta.source.as_str(),
                        event_id = %meta.event_id,
                        correlation = ?meta.correlation_id,
                        binary_path = %binary_path,
                        exit_code = ?exit_code,
                        error = ?error,
                        "Quarantine attributes not cleared"
                    );
                } else {
                    debug!(
                        source = meta.source.as_str(),
                        event_id = %meta.event_id,
                        correlation = ?meta.correlation_id,
                        binary_path = %binary_path,
                        "Quarantine attributes cleared"
                    );
                }
            }
            PlatformEvent::ProcessExecutionStarted {
                command,
                args,
                stdio,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    command = %command,
                    args = ?args,
                    stdio = ?stdio,
                    "Process started"
                );
            }
            PlatformEvent::ProcessExecutionCompleted {
                command,
                exit_code,
                duration_ms,
                stdout_bytes,
                stderr_bytes,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    command = %command,
                    exit_code = ?exit_code,
                    duration_ms = duration_ms,
                    stdout_bytes = stdout_bytes,
                    stderr_bytes = stderr_bytes,
                    "Process completed"
                );
            }
            PlatformEvent::ProcessExecutionFailed {
                command,
                failure,
                duration_ms,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    command = %command,
                    duration_ms = duration_ms,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Process failed"
                );
            }
        },

        AppEvent::General(general_event) => match general_event {
            GeneralEvent::OperationStarted { operation } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    operation = %operation,
                    "Operation started"
                );
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    operation = %operation,
                    success = success,
                    "Operation completed"
                );
            }
            GeneralEvent::OperationFailed { operation, failure } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    operation = %operation,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Operation failed"
                );
            }
        },
    }
}
