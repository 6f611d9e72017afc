#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level invocation of the jsonschema CLI
//!
//! This crate is the orchestration layer between callers and the platform
//! crate: it resolves the release binary for the host, applies quarantine
//! mitigation, executes the binary and adapts its output into an
//! [`InvocationResult`].

mod adapter;
mod launcher;

pub use adapter::{adapt, exit_only};
pub use launcher::{Launcher, LauncherBuilder};

pub use jslaunch_types::{
    InvocationOptions, InvocationRequest, InvocationResult, StdioMode, Stdout, ToolFailure,
};
