//! Pipeline execution engine
//!
//! This module builds command steps from configuration, maps them to concrete
//! actions and runs them in order.

pub mod actions;
pub mod command;
pub mod context;
pub mod interpolate;
pub mod pipeline;

// Re-export main types
pub use actions::*;
pub use command::*;
pub use context::*;
pub use interpolate::*;
pub use pipeline::*;
