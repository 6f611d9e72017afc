//! Fixed locations and names used by the launcher configuration

/// Attribute-clearing utility used on macOS
pub const XATTR_PATH: &str = "/usr/bin/xattr";

/// Config file name below the user config directory
pub const CONFIG_DIR_NAME: &str = "jslaunch";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Alternate config file for the passthrough binary
pub const ENV_CONFIG: &str = "JSLAUNCH_CONFIG";

/// Environment variables merged over the config file
pub const ENV_INSTALL_ROOT: &str = "JSLAUNCH_INSTALL_ROOT";
pub const ENV_XATTR: &str = "JSLAUNCH_XATTR";
pub const ENV_QUARANTINE: &str = "JSLAUNCH_QUARANTINE";
pub const ENV_LOG_JSON: &str = "JSLAUNCH_LOG_JSON";
