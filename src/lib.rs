//! machconf - declarative machine and container configuration steps
//!
//! A pipeline is a list of command steps. Each step tokenizes its argument string,
//! resolves gating directives such as `if_file_exists` into a single enabled flag,
//! keeps the remaining keywords as properties, and runs a concrete action with the
//! file and template helpers in [`step`].

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod step;

// Re-export commonly used types
pub use error::{MachconfError, Result};
