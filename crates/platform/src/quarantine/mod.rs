//! macOS quarantine attribute mitigation
//!
//! Binaries downloaded on macOS carry a `com.apple.quarantine` attribute and
//! Gatekeeper refuses to run them unsigned. Clearing extended attributes with
//! `xattr -c` before the first launch lets the executor start them. Every
//! other OS needs nothing.

use jslaunch_events::{EventEmitter, PlatformEvent};
use jslaunch_types::OperatingSystem;
use std::path::{Path, PathBuf};

use crate::core::PlatformContext;
use crate::process::{PlatformCommand, ProcessOperations};

/// Per-OS quarantine handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuarantineMitigation {
    /// Run `<utility> -c <binary>` and ignore the outcome
    ClearAttributes { utility: PathBuf },
    NotRequired,
}

impl QuarantineMitigation {
    /// Select the mitigation for `os`, using `utility` on macOS
    pub fn for_os(os: &OperatingSystem, utility: impl Into<PathBuf>) -> Self {
        match os {
            OperatingSystem::Darwin => Self::ClearAttributes {
                utility: utility.into(),
            },
            _ => Self::NotRequired,
        }
    }

    /// Best-effort: never fails, whatever happens to the helper process.
    pub async fn apply(
        &self,
        ctx: &PlatformContext,
        process: &dyn ProcessOperations,
        binary: &Path,
    ) {
        let Self::ClearAttributes { utility } = self else {
            return;
        };

        let binary_path = binary.display().to_string();
        ctx.emit_platform(PlatformEvent::QuarantineClearStarted {
            utility: utility.display().to_string(),
            binary_path: binary_path.clone(),
        });

        let mut cmd = PlatformCommand::new(utility);
        cmd.arg("-c").arg(binary);

        let (exit_code, error) = match process.run_inherited(ctx, cmd).await {
            Ok(code) => {
                if code != Some(0) {
                    tracing::debug!(?code, binary = %binary_path, "xattr exited unsuccessfully");
                }
                (code, None)
            }
            Err(e) => {
                tracing::warn!(error = %e, binary = %binary_path, "could not clear quarantine attributes");
                (None, Some(e.to_string()))
            }
        };

        ctx.emit_platform(PlatformEvent::QuarantineClearFinished {
            binary_path,
            exit_code,
            error,
        });
    }
}
