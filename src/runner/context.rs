//! Execution context for pipeline runs
//!
//! The context carries the state shared by every step of one run.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

/// Execution context passed to each step
pub struct Context {
    /// Directory commands run in and relative output paths resolve against
    pub working_dir: PathBuf,

    /// Configuration file path
    pub config_path: Option<PathBuf>,

    /// Pipeline variables, available to `${var}` interpolation and templates
    pub vars: BTreeMap<String, String>,

    /// Interpreter for shell steps (e.g., ["sh", "-c"])
    pub interpreter: Vec<String>,

    /// Verbosity level
    pub verbosity: Verbosity,

    /// Resolve steps but do not execute them
    pub dry_run: bool,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Verbosity {
    /// Log level filter matching this verbosity
    pub fn log_filter(self) -> &'static str {
        match self {
            Verbosity::Silent => "off",
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_path: None,
            vars: BTreeMap::new(),
            interpreter: vec!["sh".to_string(), "-c".to_string()],
            verbosity: Verbosity::Normal,
            dry_run: false,
        }
    }

    /// Create a context with a specific working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Set the configuration file path
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Set variables
    pub fn with_vars(mut self, vars: BTreeMap<String, String>) -> Self {
        self.vars = vars;
        self
    }

    /// Set a single variable
    pub fn set_var(&mut self, key: String, value: String) {
        self.vars.insert(key, value);
    }

    /// Set the interpreter
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Get the directory for the config file (or current dir)
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.working_dir.clone())
    }

    /// Resolve a possibly relative path against the working directory
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.working_dir.join(path)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_new() {
        let ctx = Context::new();
        assert_eq!(ctx.verbosity, Verbosity::Normal);
        assert_eq!(ctx.interpreter, vec!["sh", "-c"]);
        assert!(ctx.vars.is_empty());
        assert!(!ctx.dry_run);
    }

    #[test]
    fn test_context_with_vars() {
        let mut vars = BTreeMap::new();
        vars.insert("key".to_string(), "value".to_string());

        let ctx = Context::new().with_vars(vars);
        assert_eq!(ctx.vars.get("key"), Some(&"value".to_string()));
    }

    #[test]
    fn test_context_set_var() {
        let mut ctx = Context::new();
        ctx.set_var("test".to_string(), "value".to_string());
        assert_eq!(ctx.vars.get("test"), Some(&"value".to_string()));
    }

    #[test]
    fn test_config_dir_falls_back_to_working_dir() {
        let ctx = Context::new().with_working_dir(PathBuf::from("/srv/app"));
        assert_eq!(ctx.config_dir(), PathBuf::from("/srv/app"));

        let ctx = ctx.with_config_path(PathBuf::from("/etc/machconf/machconf.yml"));
        assert_eq!(ctx.config_dir(), PathBuf::from("/etc/machconf"));
    }

    #[test]
    fn test_resolve_path() {
        let ctx = Context::new().with_working_dir(PathBuf::from("/srv/app"));
        assert_eq!(ctx.resolve_path("conf/a.txt"), PathBuf::from("/srv/app/conf/a.txt"));
        assert_eq!(ctx.resolve_path("/abs/b.txt"), PathBuf::from("/abs/b.txt"));
    }

    #[test]
    fn test_verbosity_levels() {
        assert!(Verbosity::Verbose > Verbosity::Normal);
        assert!(Verbosity::Normal > Verbosity::Quiet);
        assert!(Verbosity::Quiet > Verbosity::Silent);
        assert_eq!(Verbosity::Verbose.log_filter(), "debug");
        assert_eq!(Verbosity::Silent.log_filter(), "off");
    }

    #[test]
    fn test_with_interpreter_and_dry_run() {
        let ctx = Context::new()
            .with_interpreter(vec!["bash".to_string(), "-c".to_string()])
            .with_dry_run(true);
        assert_eq!(ctx.interpreter, vec!["bash", "-c"]);
        assert!(ctx.dry_run);
    }
}
