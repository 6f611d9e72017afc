//! Invocation pipeline for the jsonschema release binary

use jslaunch_config::{default_install_root, Config, QuarantineConfig};
use jslaunch_errors::Error;
use jslaunch_events::{EventEmitter, EventSender, FailureContext};
use jslaunch_platform::{
    executable_path, resolve_executable, HostPlatform, Platform, PlatformCommand,
    PlatformContext, QuarantineMitigation,
};
use jslaunch_types::{InvocationOptions, InvocationRequest, InvocationResult, StdioMode};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::adapter;

const OPERATION: &str = "invoke";

/// Runs the jsonschema binary for the host platform.
///
/// Every invocation resolves the binary, clears quarantine attributes where
/// the host needs it, executes, and adapts the output, strictly in that
/// order. The host pair and binary path are computed once at construction
/// and never change, so a `Launcher` can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Launcher {
    platform: Platform,
    host: HostPlatform,
    install_root: PathBuf,
    executable: PathBuf,
    quarantine: QuarantineMitigation,
    tx: Option<EventSender>,
}

impl Launcher {
    #[must_use]
    pub fn builder() -> LauncherBuilder {
        LauncherBuilder::new()
    }

    /// Launcher for the running host with settings taken from `config`
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        LauncherBuilder::new().with_config(config).build()
    }

    #[must_use]
    pub fn host(&self) -> &HostPlatform {
        &self.host
    }

    #[must_use]
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Expected binary location. Existence is only checked by [`Self::executable`].
    #[must_use]
    pub fn executable_path(&self) -> &Path {
        &self.executable
    }

    #[must_use]
    pub fn quarantine(&self) -> &QuarantineMitigation {
        &self.quarantine
    }

    /// Locate the binary for this host
    ///
    /// # Errors
    ///
    /// Returns a platform error when the host has no release binary.
    pub async fn executable(&self) -> Result<PathBuf, Error> {
        let ctx = self.context(None);
        Ok(resolve_executable(&ctx, &self.install_root, &self.host).await?)
    }

    /// Run the tool with the given options
    ///
    /// # Errors
    ///
    /// See [`Self::invoke`].
    pub async fn spawn<I, S>(
        &self,
        args: I,
        options: InvocationOptions,
    ) -> Result<InvocationResult, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let request = InvocationRequest::new(args).with_options(options);
        self.invoke(&request).await
    }

    /// Run with piped output, decoding stdout as JSON when `json` is set
    ///
    /// # Errors
    ///
    /// See [`Self::invoke`].
    pub async fn run_captured<I, S>(&self, args: I, json: bool) -> Result<InvocationResult, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.spawn(args, InvocationOptions::captured().with_json(json))
            .await
    }

    /// Run attached to the caller's terminal; only the exit code is observed
    ///
    /// # Errors
    ///
    /// See [`Self::invoke`].
    pub async fn run_inherited<I, S>(&self, args: I, json: bool) -> Result<InvocationResult, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.spawn(args, InvocationOptions::inherited().with_json(json))
            .await
    }

    /// Execute a single invocation.
    ///
    /// A non-zero exit of the tool is an `Ok` result; inspect it with
    /// [`InvocationResult::failure`].
    ///
    /// # Errors
    ///
    /// - [`jslaunch_errors::PlatformError::UnsupportedPlatform`] when no binary exists for the host
    /// - [`jslaunch_errors::PlatformError::SpawnFailed`] when the binary cannot be started
    /// - [`jslaunch_errors::InvokeError::DecodeFailed`] when JSON output was requested but
    ///   stdout is not JSON
    pub async fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResult, Error> {
        let correlation_id = Uuid::new_v4().to_string();
        let ctx = self.context(Some(correlation_id.clone()));

        tracing::debug!(
            correlation_id = %correlation_id,
            command = ?request.args.first(),
            stdio = ?request.options.stdio,
            json = request.options.json,
            "invoking jsonschema"
        );
        ctx.emit_operation_started(OPERATION);

        match self.run_pipeline(&ctx, request).await {
            Ok(result) => {
                ctx.emit_operation_completed(OPERATION, result.is_success());
                Ok(result)
            }
            Err(e) => {
                tracing::debug!(correlation_id = %correlation_id, error = %e, "invocation failed");
                ctx.emit_operation_failed(OPERATION, FailureContext::from_error(&e));
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        ctx: &PlatformContext,
        request: &InvocationRequest,
    ) -> Result<InvocationResult, Error> {
        let binary = resolve_executable(ctx, &self.install_root, &self.host).await?;

        let process = self.platform.process();
        self.quarantine.apply(ctx, process, &binary).await;

        let mut cmd = PlatformCommand::new(&binary);
        cmd.args(request.effective_args());

        match request.options.stdio {
            StdioMode::Pipe => {
                let output = process.run_captured(ctx, cmd).await?;
                Ok(adapter::adapt(output, request.options.json)?)
            }
            StdioMode::Inherit => {
                let code = process.run_inherited(ctx, cmd).await?;
                Ok(adapter::exit_only(code))
            }
        }
    }

    fn context(&self, correlation_id: Option<String>) -> PlatformContext {
        let ctx = self.platform.create_context(self.tx.clone());
        match correlation_id {
            Some(id) => ctx.with_correlation_id(id),
            None => ctx,
        }
    }
}

/// Builder for [`Launcher`]. Anything left unset falls back to the running
/// host and the default configuration.
#[derive(Debug, Default)]
pub struct LauncherBuilder {
    platform: Option<Platform>,
    host: Option<HostPlatform>,
    install_root: Option<PathBuf>,
    quarantine: Option<QuarantineConfig>,
    tx: Option<EventSender>,
}

impl LauncherBuilder {
    /// Create new launcher builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the process executor
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Override host detection
    #[must_use]
    pub fn with_host(mut self, host: HostPlatform) -> Self {
        self.host = Some(host);
        self
    }

    /// Set the package root containing `build/github-releases`
    #[must_use]
    pub fn with_install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn with_quarantine(mut self, quarantine: QuarantineConfig) -> Self {
        self.quarantine = Some(quarantine);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Apply install root and quarantine settings from configuration
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        self.install_root = Some(config.install_root());
        self.quarantine = Some(config.quarantine.clone());
        self
    }

    #[must_use]
    pub fn build(self) -> Launcher {
        let host = self.host.unwrap_or_else(HostPlatform::detect);
        let install_root = self.install_root.unwrap_or_else(default_install_root);
        let executable = executable_path(&install_root, &host.pair);

        let quarantine = match self.quarantine.unwrap_or_default() {
            QuarantineConfig {
                enabled: true,
                utility,
            } => QuarantineMitigation::for_os(&host.pair.os, utility),
            QuarantineConfig { enabled: false, .. } => QuarantineMitigation::NotRequired,
        };

        Launcher {
            platform: self.platform.unwrap_or_else(Platform::current),
            host,
            install_root,
            executable,
            quarantine,
            tx: self.tx,
        }
    }
}
