//! CLI interface and argument parsing
//!
//! This module handles command-line parsing and drives a pipeline run.

pub mod app;

// Re-export main types
pub use app::*;
