//! Command line handling
//!
//! Nothing is interpreted here: every argument, including `--help`,
//! `--version` and `--`, is handed to the platform binary as-is. Arguments
//! stay `OsString` so values that are not valid UTF-8 survive the trip.

use std::ffi::OsString;

/// Arguments forwarded to the platform binary
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cli {
    pub args: Vec<OsString>,
}

impl Cli {
    /// Arguments of the running process
    pub fn from_env() -> Self {
        Self::from_args(std::env::args_os())
    }

    /// Build from a full argument vector whose first item is the program name
    pub fn from_args<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            args: argv.into_iter().skip(1).map(Into::into).collect(),
        }
    }
}
