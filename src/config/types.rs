//! Core configuration types
//!
//! This module defines the data structures that represent a machconf.yml pipeline.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Pipeline name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Pipeline usage description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Interpreter for shell steps (e.g., ["bash", "-c"])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<Vec<String>>,

    /// Variables available to interpolation and templates
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: BTreeMap<String, String>,

    /// Steps, in execution order
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// A step definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StepConfig {
    /// Command name selecting the action
    pub command: String,

    /// Human-readable step label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Argument string, tokenized when the step is built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,

    /// Every other key: gating directives and properties, in document order
    #[serde(flatten)]
    pub options: Mapping,
}

impl StepConfig {
    /// Create a step definition with no name, args or options
    pub fn new(command: impl Into<String>) -> Self {
        StepConfig {
            command: command.into(),
            name: None,
            args: None,
            options: Mapping::new(),
        }
    }

    /// Label used in messages: the name if set, otherwise the command
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.command)
    }

    /// Options as ordered `(key, value)` pairs; keys must be strings
    pub fn option_pairs(&self) -> ConfigResult<Vec<(String, Value)>> {
        self.options
            .iter()
            .map(|(key, value)| match key {
                Value::String(key) => Ok((key.clone(), value.clone())),
                other => Err(ConfigError::Invalid(format!(
                    "step '{}' has a non-string option key: {:?}",
                    self.label(),
                    other
                ))),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_options_keep_document_order() {
        let yaml = r#"
command: shell
name: install
args: "'apt-get install -y nginx'"
zeta: 1
if_not_file_exists: /usr/sbin/nginx
alpha: two
enabled: true
"#;
        let step: StepConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(step.command, "shell");
        assert_eq!(step.name.as_deref(), Some("install"));
        assert_eq!(step.args.as_deref(), Some("'apt-get install -y nginx'"));

        let keys: Vec<String> = step.option_pairs().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "if_not_file_exists", "alpha", "enabled"]);
    }

    #[test]
    fn test_non_string_option_key() {
        let mut step = StepConfig::new("echo");
        step.options.insert(Value::from(1), Value::from("numeric key"));
        assert!(matches!(step.option_pairs(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_label() {
        let mut step = StepConfig::new("echo");
        assert_eq!(step.label(), "echo");
        step.name = Some("greet".to_string());
        assert_eq!(step.label(), "greet");
    }
}
