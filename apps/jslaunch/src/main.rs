//! jsonschema - passthrough launcher for the platform-specific JSON Schema CLI
//!
//! Locates the release binary for the host, forwards every argument to it
//! with inherited stdio, and exits with the binary's own exit code.

mod cli;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::CliError;
use jslaunch_config::constants::ENV_CONFIG;
use jslaunch_config::{Config, LoggingConfig};
use jslaunch_ops::{InvocationResult, Launcher};
use std::path::PathBuf;
use std::process;
use tracing::debug;

/// Exit code when the launcher fails before the tool reports a status
const LAUNCH_FAILURE_EXIT_CODE: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::from_env();

    // Configuration also decides how logging is set up, so load it first
    let config = load_config().await;
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            debug!(error = %e, "launcher failed");
            eprintln!("Error: {e}");
            process::exit(LAUNCH_FAILURE_EXIT_CODE);
        }
    }
}

/// Load configuration with precedence defaults < file < environment
async fn load_config() -> Result<Config, CliError> {
    let path = std::env::var_os(ENV_CONFIG)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);

    let mut config = Config::load_or_default(path.as_deref()).await?;
    config.merge_env()?;
    Ok(config)
}

/// Main application logic
async fn run(cli: Cli, config: Config) -> Result<i32, CliError> {
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        args = cli.args.len(),
        "starting jsonschema launcher"
    );

    let (event_sender, event_receiver) = jslaunch_events::channel();
    let event_logger = tokio::spawn(logging::forward_events(event_receiver));

    let launcher = Launcher::builder()
        .with_config(&config)
        .with_event_sender(event_sender)
        .build();
    let result = launcher.run_inherited(cli.args, false).await;

    // Closing the last sender lets the logger drain and finish
    drop(launcher);
    let _ = event_logger.await;

    Ok(exit_code(&result?))
}

/// Exit code to report for a finished tool run
fn exit_code(result: &InvocationResult) -> i32 {
    result.code.unwrap_or(LAUNCH_FAILURE_EXIT_CODE)
}

/// Install the tracing subscriber. Diagnostics always go to stderr so the
/// tool's stdout stays clean.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.filter));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jslaunch_ops::Stdout;

    #[test]
    fn test_exit_code_passes_tool_code_through() {
        let result = InvocationResult {
            code: Some(3),
            stdout: Stdout::default(),
            stderr: String::new(),
        };
        assert_eq!(exit_code(&result), 3);
    }

    #[test]
    fn test_exit_code_without_status_is_failure() {
        let result = InvocationResult {
            code: None,
            stdout: Stdout::default(),
            stderr: String::new(),
        };
        assert_eq!(exit_code(&result), LAUNCH_FAILURE_EXIT_CODE);
    }
}
