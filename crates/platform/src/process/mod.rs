//! Process execution operations

use async_trait::async_trait;
use jslaunch_errors::PlatformError;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::core::PlatformContext;

/// Platform-specific command builder and execution
///
/// Arguments are kept as `OsString` so values that are not valid UTF-8
/// reach the child unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl PlatformCommand {
    /// Create a new platform command
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument to the command
    pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_os_string());
        }
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Program as shown in events and error messages
    pub fn display_name(&self) -> String {
        self.program.display().to_string()
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as shown in events, lossily converted to UTF-8
    pub fn display_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

/// Output from a captured execution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the child ended without an exit status
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Abstract executor for the external tool.
///
/// Implementations must return `Err` only for infrastructure failures
/// (the child could not be started or awaited). A child that runs and exits
/// non-zero is an `Ok` outcome.
#[async_trait]
pub trait ProcessOperations: Send + Sync {
    /// Run with piped stdio, accumulating both streams until the child exits
    async fn run_captured(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, PlatformError>;

    /// Run sharing the caller's stdio and return the exit code
    async fn run_inherited(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<Option<i32>, PlatformError>;
}
