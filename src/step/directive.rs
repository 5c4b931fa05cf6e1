//! Gating directives
//!
//! A fixed set of keyword options decide whether a step is enabled. Any other
//! keyword is a property. Directives are applied in the order the caller gives them
//! and the last one to change the gate wins.

use crate::error::{StepError, StepResult};
use crate::step::files::{directory_exists, file_exists};
use crate::step::properties::Properties;
use serde_yaml::Value;
use std::fmt;

/// A recognized gating keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    IfFileExists,
    IfNotFileExists,
    IfDirectoryExists,
    IfNotDirectoryExists,
    Enabled,
    Disabled,
}

impl Directive {
    pub const ALL: [Directive; 6] = [
        Directive::IfFileExists,
        Directive::IfNotFileExists,
        Directive::IfDirectoryExists,
        Directive::IfNotDirectoryExists,
        Directive::Enabled,
        Directive::Disabled,
    ];

    /// Look up the directive for a keyword; `None` means the keyword is a property
    pub fn from_key(key: &str) -> Option<Directive> {
        match key {
            "if_file_exists" => Some(Directive::IfFileExists),
            "if_not_file_exists" => Some(Directive::IfNotFileExists),
            "if_directory_exists" => Some(Directive::IfDirectoryExists),
            "if_not_directory_exists" => Some(Directive::IfNotDirectoryExists),
            "enabled" => Some(Directive::Enabled),
            "disabled" => Some(Directive::Disabled),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Directive::IfFileExists => "if_file_exists",
            Directive::IfNotFileExists => "if_not_file_exists",
            Directive::IfDirectoryExists => "if_directory_exists",
            Directive::IfNotDirectoryExists => "if_not_directory_exists",
            Directive::Enabled => "enabled",
            Directive::Disabled => "disabled",
        }
    }

    /// Apply this directive to the current gate value and return the new one
    pub fn apply(self, enabled: bool, value: &Value) -> StepResult<bool> {
        let next = match self {
            Directive::IfFileExists => {
                if file_exists(path_value(self, value)?) {
                    enabled
                } else {
                    false
                }
            }
            Directive::IfNotFileExists => {
                if file_exists(path_value(self, value)?) {
                    false
                } else {
                    enabled
                }
            }
            Directive::IfDirectoryExists => {
                if directory_exists(path_value(self, value)?) {
                    enabled
                } else {
                    false
                }
            }
            Directive::IfNotDirectoryExists => {
                if directory_exists(path_value(self, value)?) {
                    false
                } else {
                    enabled
                }
            }
            Directive::Enabled => truthy(value),
            Directive::Disabled => !truthy(value),
        };
        Ok(next)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Truthiness of a keyword value: null, `false`, zero, and empty strings or
/// collections are false; everything else is true
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => truthy(&tagged.value),
    }
}

/// Extract the path a path directive checks; scalars are converted to text
fn path_value(directive: Directive, value: &Value) -> StepResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Tagged(tagged) => path_value(directive, &tagged.value),
        _ => Err(StepError::InvalidArgument(format!(
            "'{}' expects a path, got {:?}",
            directive, value
        ))),
    }
}

/// Outcome of resolving a step's keyword options
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub enabled: bool,
    pub properties: Properties,
}

impl Default for Gate {
    fn default() -> Self {
        Gate {
            enabled: true,
            properties: Properties::new(),
        }
    }
}

impl Gate {
    /// Resolve ordered keyword options into an enabled flag and properties
    pub fn resolve<K, I>(options: I) -> StepResult<Gate>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut gate = Gate::default();
        for (key, value) in options {
            gate.apply(key.into(), value)?;
        }
        Ok(gate)
    }

    /// Apply a single keyword option
    pub fn apply(&mut self, key: String, value: Value) -> StepResult<()> {
        match Directive::from_key(&key) {
            Some(directive) => self.enabled = directive.apply(self.enabled, &value)?,
            None => {
                self.properties.insert(key, value);
            }
        }
        Ok(())
    }
}
