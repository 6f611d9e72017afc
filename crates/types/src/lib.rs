#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for jslaunch
//!
//! This crate provides the data model shared by the launcher crates: the
//! canonical platform pair used to name release binaries, and the request
//! and result shapes of a single invocation.

pub mod invocation;
pub mod platform;

// Re-export commonly used types
pub use invocation::{
    InvocationOptions, InvocationRequest, InvocationResult, StdioMode, Stdout, ToolFailure,
    JSON_FLAG,
};
pub use platform::{Arch, OperatingSystem, PlatformPair, RawPlatform, EXECUTABLE_STEM};
