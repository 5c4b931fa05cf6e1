//! Configuration validation
//!
//! This module provides validation logic for pipeline documents.

use crate::config::types::{Config, StepConfig};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Validate a complete configuration
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    if let Some(interpreter) = &config.interpreter {
        if interpreter.is_empty() {
            return Err(ConfigError::Invalid(
                "interpreter must name at least a program".to_string(),
            ));
        }
    }

    let mut names = HashSet::new();
    for (index, step) in config.steps.iter().enumerate() {
        validate_step(index, step)?;

        if let Some(name) = &step.name {
            if !names.insert(name.as_str()) {
                return Err(ConfigError::DuplicateStep(name.clone()));
            }
        }
    }

    Ok(())
}

/// Validate a single step
pub fn validate_step(index: usize, step: &StepConfig) -> ConfigResult<()> {
    if step.command.trim().is_empty() {
        return Err(ConfigError::Invalid(format!(
            "step {} has an empty command",
            index + 1
        )));
    }

    step.option_pairs()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn config_with(steps: Vec<StepConfig>) -> Config {
        Config {
            steps,
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let mut named = StepConfig::new("echo");
        named.name = Some("one".to_string());
        let config = config_with(vec![named, StepConfig::new("echo"), StepConfig::new("echo")]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_command() {
        let config = config_with(vec![StepConfig::new("  ")]);
        assert!(matches!(validate_config(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_duplicate_step_names() {
        let mut first = StepConfig::new("echo");
        first.name = Some("same".to_string());
        let second = first.clone();

        let result = validate_config(&config_with(vec![first, second]));
        assert!(matches!(result, Err(ConfigError::DuplicateStep(name)) if name == "same"));
    }

    #[test]
    fn test_empty_interpreter() {
        let config = Config {
            interpreter: Some(vec![]),
            ..Config::default()
        };
        assert!(matches!(validate_config(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_string_key_fails_validation() {
        let mut step = StepConfig::new("echo");
        step.options.insert(Value::Bool(true), Value::Null);
        assert!(validate_config(&config_with(vec![step])).is_err());
    }
}
