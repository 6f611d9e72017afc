//! Canonical platform identifiers used to pick a release binary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Release assets are named `jsonschema-<os>-<arch><ext>`.
pub const EXECUTABLE_STEM: &str = "jsonschema";

/// Operating system component of a [`PlatformPair`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum OperatingSystem {
    Windows,
    Darwin,
    Linux,
    /// Anything else, kept verbatim
    Other(String),
}

impl OperatingSystem {
    /// Normalize a host-reported OS name.
    ///
    /// `win32` becomes `windows`. Rust hosts report `macos`, which becomes
    /// `darwin`. Every other value passes through unchanged.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "win32" | "windows" => Self::Windows,
            "darwin" | "macos" => Self::Darwin,
            "linux" => Self::Linux,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Windows => "windows",
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::Other(name) => name,
        }
    }

    /// File extension carried by executables on this OS
    #[must_use]
    pub fn executable_suffix(&self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            _ => "",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for OperatingSystem {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<OperatingSystem> for String {
    fn from(os: OperatingSystem) -> Self {
        os.as_str().to_string()
    }
}

/// CPU architecture component of a [`PlatformPair`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Arch {
    X86_64,
    Arm64,
    /// Anything else, kept verbatim
    Other(String),
}

impl Arch {
    /// Normalize a host-reported architecture name.
    ///
    /// `x64` becomes `x86_64`. Rust hosts report `aarch64`, which becomes
    /// `arm64`. Every other value passes through unchanged.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "x64" | "x86_64" => Self::X86_64,
            "arm64" | "aarch64" => Self::Arm64,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Arm64 => "arm64",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Arch {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<Arch> for String {
    fn from(arch: Arch) -> Self {
        arch.as_str().to_string()
    }
}

/// OS and architecture exactly as the host reported them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPlatform {
    pub os: String,
    pub arch: String,
}

impl RawPlatform {
    #[must_use]
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Values reported by the running host
    #[must_use]
    pub fn host() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    #[must_use]
    pub fn normalize(&self) -> PlatformPair {
        PlatformPair {
            os: OperatingSystem::from_raw(&self.os),
            arch: Arch::from_raw(&self.arch),
        }
    }
}

/// Canonical (OS, architecture) pair used to select a binary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformPair {
    pub os: OperatingSystem,
    pub arch: Arch,
}

impl PlatformPair {
    #[must_use]
    pub fn new(os: OperatingSystem, arch: Arch) -> Self {
        Self { os, arch }
    }

    #[must_use]
    pub fn from_raw(os: &str, arch: &str) -> Self {
        RawPlatform::new(os, arch).normalize()
    }

    /// File name of the release binary for this pair
    #[must_use]
    pub fn executable_name(&self) -> String {
        format!(
            "{EXECUTABLE_STEM}-{}-{}{}",
            self.os,
            self.arch,
            self.os.executable_suffix()
        )
    }
}

impl fmt::Display for PlatformPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}
