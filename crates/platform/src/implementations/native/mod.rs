//! Native platform implementation

pub mod process;
