//! Command steps
//!
//! A command step tokenizes its argument string, resolves its gating directives
//! into a single enabled flag, keeps every other keyword as a property, and offers
//! file and template helpers to the concrete actions built on top of it.

pub mod command;
pub mod directive;
pub mod executable;
pub mod files;
pub mod properties;
pub mod template;
pub mod token;
pub mod tokenize;

// Re-export main types
pub use command::*;
pub use directive::*;
pub use executable::*;
pub use files::*;
pub use properties::*;
pub use template::*;
pub use token::*;
pub use tokenize::*;
