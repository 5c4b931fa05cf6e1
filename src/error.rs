//! Error types for machconf

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for machconf operations
pub type Result<T> = std::result::Result<T, MachconfError>;

/// Main error type for machconf
#[derive(Error, Debug)]
pub enum MachconfError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Step execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// Errors raised by the command step core
    #[error("Step error: {0}")]
    Step(#[from] StepError),

    /// Variable interpolation errors
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised while building a command step or by its file and template helpers
#[derive(Error, Debug)]
pub enum StepError {
    #[error("Malformed arguments '{input}': {reason}")]
    MalformedArguments { input: String, reason: String },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("File exists and overwrite was not requested: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Pipeline document parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Step name '{0}' is used more than once")]
    DuplicateStep(String),

    #[error("Step '{step}' could not be built: {source}")]
    Step {
        step: String,
        #[source]
        source: StepError,
    },
}

/// Step execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command failed with exit code {0:?}")]
    CommandFailed(Option<i32>),

    #[error("Step '{step}' requires the '{property}' property")]
    MissingProperty { step: String, property: String },

    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    #[error(transparent)]
    Step(#[from] StepError),
}

/// Variable interpolation errors
#[derive(Error, Debug)]
pub enum InterpolationError {
    #[error("Invalid interpolation syntax: {0}")]
    InvalidSyntax(String),

    #[error("Recursive interpolation detected")]
    RecursiveInterpolation,
}

/// Specialized result type for the command step core
pub type StepResult<T> = std::result::Result<T, StepError>;

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Specialized result type for interpolation operations
pub type InterpolationResult<T> = std::result::Result<T, InterpolationError>;

impl StepError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        StepError::MalformedArguments {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StepError::Io {
            path: path.into(),
            source,
        }
    }
}
