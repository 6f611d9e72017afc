#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for jslaunch
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/jslaunch/config.toml)
//! - Environment variables

pub mod constants;

use constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, ENV_INSTALL_ROOT, ENV_LOG_JSON, ENV_QUARANTINE, ENV_XATTR,
    XATTR_PATH,
};
use jslaunch_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub quarantine: QuarantineConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PathConfig {
    /// Package root containing `build/github-releases`
    pub install_root: Option<PathBuf>,
}

/// macOS quarantine attribute handling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuarantineConfig {
    #[serde(default = "default_quarantine_enabled")]
    pub enabled: bool,
    #[serde(default = "default_xattr_utility")]
    pub utility: PathBuf,
}

/// Diagnostics written by the launcher itself (never the tool's output)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for QuarantineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            utility: PathBuf::from(XATTR_PATH),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            filter: default_log_filter(),
        }
    }
}

// Default value functions for serde
fn default_quarantine_enabled() -> bool {
    true
}

fn default_xattr_utility() -> PathBuf {
    PathBuf::from(XATTR_PATH)
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn parse_bool(field: &str, value: String) -> Result<bool, Error> {
    match value.as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into()),
    }
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// A missing config directory is not an error here; the launcher must
    /// work without any configuration at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let Ok(config_path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if fs::try_exists(&config_path).await.unwrap_or(false) {
            tracing::debug!(path = %config_path.display(), "loading launcher config");
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with process environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Merge values produced by `lookup`, keyed by environment variable name
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean variable holds an unrecognized value.
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // JSLAUNCH_INSTALL_ROOT
        if let Some(root) = lookup(ENV_INSTALL_ROOT).filter(|v| !v.is_empty()) {
            self.paths.install_root = Some(PathBuf::from(root));
        }

        // JSLAUNCH_XATTR
        if let Some(utility) = lookup(ENV_XATTR).filter(|v| !v.is_empty()) {
            self.quarantine.utility = PathBuf::from(utility);
        }

        // JSLAUNCH_QUARANTINE
        if let Some(enabled) = lookup(ENV_QUARANTINE) {
            self.quarantine.enabled = parse_bool(ENV_QUARANTINE, enabled)?;
        }

        // JSLAUNCH_LOG_JSON
        if let Some(json) = lookup(ENV_LOG_JSON) {
            self.logging.json = parse_bool(ENV_LOG_JSON, json)?;
        }

        Ok(())
    }

    /// Get the install root (with default)
    #[must_use]
    pub fn install_root(&self) -> PathBuf {
        self.paths
            .install_root
            .clone()
            .unwrap_or_else(default_install_root)
    }
}

/// The launcher is shipped as `<root>/bin/<launcher>`, so the package root
/// is two levels above the running executable.
#[must_use]
pub fn default_install_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}
