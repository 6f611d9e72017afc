//! Platform abstraction layer for launching the jsonschema release binary.
//!
//! This crate provides:
//! - Host identification and release binary resolution
//! - macOS quarantine attribute mitigation
//! - Process execution behind the [`ProcessOperations`] trait, with a native
//!   implementation that emits platform events

pub mod core;
pub mod implementations;
pub mod process;
pub mod quarantine;
pub mod resolver;

pub use crate::core::{Platform, PlatformContext};
pub use implementations::native::process::NativeProcessOperations;

/// Re-export commonly used types
pub use process::{CommandOutput, PlatformCommand, ProcessOperations};
pub use quarantine::QuarantineMitigation;
pub use resolver::{executable_path, resolve_executable, HostPlatform};
