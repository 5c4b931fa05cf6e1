//! Configuration file parsing and discovery

use crate::config::types::Config;
use crate::error::{ConfigError, ConfigResult, MachconfError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["machconf.yml", "machconf.yaml"];

/// Find the configuration file by searching current and parent directories
pub fn find_config_file() -> ConfigResult<PathBuf> {
    find_config_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the configuration file starting from a specific directory
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in CONFIG_FILE_NAMES {
            let config_path = current_dir.join(file_name);
            searched_paths.push(config_path.display().to_string());

            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        // Try parent directory
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Parse a configuration file from a path
pub fn parse_config_file(path: &Path) -> Result<Config, MachconfError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read {}: {}", path.display(), e)))?;

    parse_config(&contents)
}

/// Parse configuration from a string
pub fn parse_config(yaml: &str) -> Result<Config, MachconfError> {
    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

/// Parse configuration with automatic file discovery
pub fn parse_config_auto() -> Result<(Config, PathBuf), MachconfError> {
    let config_path = find_config_file()?;
    let config = parse_config_file(&config_path)?;
    Ok((config, config_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SIMPLE: &str = r#"
steps:
  - command: echo
    args: "'hello'"
"#;

    #[test]
    fn test_parse_simple_config() {
        let config = parse_config(SIMPLE).unwrap();
        assert_eq!(config.steps.len(), 1);
        assert_eq!(config.steps[0].command, "echo");
        assert_eq!(config.steps[0].args.as_deref(), Some("'hello'"));
    }

    #[test]
    fn test_parse_empty_document_fields() {
        let config = parse_config("name: empty\n").unwrap();
        assert_eq!(config.name, Some("empty".to_string()));
        assert!(config.steps.is_empty());
        assert!(config.vars.is_empty());
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("machconf.yml");
        fs::write(&config_path, SIMPLE).unwrap();

        let found = find_config_file_from(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_yaml_extension() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("machconf.yaml");
        fs::write(&config_path, SIMPLE).unwrap();

        let found = find_config_file_from(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("machconf.yml");
        let sub_dir = temp_dir.path().join("subdir");

        fs::create_dir(&sub_dir).unwrap();
        fs::write(&config_path, SIMPLE).unwrap();

        let found = find_config_file_from(sub_dir).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_config_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = find_config_file_from(temp_dir.path().to_path_buf());
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_parse_config_with_interpreter_and_vars() {
        let yaml = r#"
interpreter:
  - bash
  - -c
vars:
  user: deploy
steps: []
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(
            config.interpreter,
            Some(vec!["bash".to_string(), "-c".to_string()])
        );
        assert_eq!(config.vars.get("user"), Some(&"deploy".to_string()));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_config("steps: [unclosed");
        assert!(matches!(result, Err(MachconfError::Yaml(_))));
    }

    #[test]
    fn test_step_without_command_is_rejected() {
        let result = parse_config("steps:\n  - name: nothing\n");
        assert!(matches!(result, Err(MachconfError::Yaml(_))));
    }
}
