//! Executable resolution for the host platform
//!
//! Maps a [`PlatformPair`] to the release binary below an install root and
//! checks that the file is there before anything tries to run it.

use jslaunch_errors::PlatformError;
use jslaunch_events::{EventEmitter, PlatformEvent};
use jslaunch_types::{PlatformPair, RawPlatform};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::PlatformContext;

/// Release binaries live in `<install_root>/build/github-releases`.
const RELEASE_DIR: [&str; 2] = ["build", "github-releases"];

/// Host platform as reported and as normalized.
///
/// Computed once and reused for every stage of a launch so the quarantine
/// step and the executor always agree on the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub raw: RawPlatform,
    pub pair: PlatformPair,
}

impl HostPlatform {
    /// Identify the running host
    #[must_use]
    pub fn detect() -> Self {
        Self::from_raw(RawPlatform::host())
    }

    #[must_use]
    pub fn from_raw(raw: RawPlatform) -> Self {
        let pair = raw.normalize();
        Self { raw, pair }
    }
}

/// Path of the release binary for `pair`, whether or not it exists
#[must_use]
pub fn executable_path(install_root: &Path, pair: &PlatformPair) -> PathBuf {
    RELEASE_DIR
        .iter()
        .fold(install_root.to_path_buf(), |path, part| path.join(part))
        .join(pair.executable_name())
}

/// Locate the release binary for `host` below `install_root`.
///
/// # Errors
///
/// Returns [`PlatformError::UnsupportedPlatform`] naming the raw host
/// identifiers when no file exists at the computed path.
pub async fn resolve_executable(
    ctx: &PlatformContext,
    install_root: &Path,
    host: &HostPlatform,
) -> Result<PathBuf, PlatformError> {
    let path = executable_path(install_root, &host.pair);

    // Unreadable metadata counts as missing
    if !fs::try_exists(&path).await.unwrap_or(false) {
        tracing::debug!(path = %path.display(), platform = %host.pair, "no release binary");
        return Err(PlatformError::UnsupportedPlatform {
            os: host.raw.os.clone(),
            arch: host.raw.arch.clone(),
            expected_path: path.display().to_string(),
        });
    }

    ctx.emit_platform(PlatformEvent::ExecutableResolved {
        platform: host.pair.to_string(),
        path: path.display().to_string(),
    });
    Ok(path)
}
