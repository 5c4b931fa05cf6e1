//! Variable interpolation for strings
//!
//! This module replaces `${var}` references using pipeline variables, falling back
//! to the process environment.

use crate::error::{InterpolationError, InterpolationResult};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::env;

/// How many rounds of nested substitution are allowed before giving up
const MAX_DEPTH: usize = 16;

fn var_pattern() -> InterpolationResult<Regex> {
    Regex::new(r"\$\{([^}]+)\}").map_err(|e| InterpolationError::InvalidSyntax(e.to_string()))
}

/// Interpolate variables in a string
///
/// Supports:
/// - `${var}` - variable from context
/// - Environment variables (when not found in context)
///
/// Unknown variables are left as written.
pub fn interpolate(s: &str, vars: &BTreeMap<String, String>) -> InterpolationResult<String> {
    let re = var_pattern()?;
    let mut result = s.to_string();

    // values may themselves contain references
    for _ in 0..MAX_DEPTH {
        let mut changed = false;
        let next = re
            .replace_all(&result, |caps: &Captures| {
                let name = &caps[1];
                if let Some(value) = vars.get(name) {
                    changed = true;
                    value.clone()
                } else if let Ok(value) = env::var(name) {
                    changed = true;
                    value
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned();

        if !changed {
            return Ok(next);
        }
        result = next;
    }

    Err(InterpolationError::RecursiveInterpolation)
}

/// Interpolate a list of strings
pub fn interpolate_list(
    list: &[String],
    vars: &BTreeMap<String, String>,
) -> InterpolationResult<Vec<String>> {
    list.iter()
        .map(|s| interpolate(s, vars))
        .collect::<InterpolationResult<Vec<String>>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_interpolation() {
        let mut vars = BTreeMap::new();
        vars.insert("name".to_string(), "world".to_string());

        let result = interpolate("Hello, ${name}!", &vars).unwrap();
        assert_eq!(result, "Hello, world!");
    }

    #[test]
    fn test_repeated_variable() {
        let mut vars = BTreeMap::new();
        vars.insert("pkg".to_string(), "nginx".to_string());

        let result = interpolate("${pkg} ${pkg}", &vars).unwrap();
        assert_eq!(result, "nginx nginx");
    }

    #[test]
    fn test_environment_variable() {
        env::set_var("TEST_VAR_MACHCONF", "test_value");

        let vars = BTreeMap::new();
        let result = interpolate("Value: ${TEST_VAR_MACHCONF}", &vars).unwrap();
        assert_eq!(result, "Value: test_value");

        env::remove_var("TEST_VAR_MACHCONF");
    }

    #[test]
    fn test_undefined_variable_lenient() {
        let vars = BTreeMap::new();
        let result = interpolate("Hello, ${undefined_machconf}!", &vars).unwrap();
        assert_eq!(result, "Hello, ${undefined_machconf}!");
    }

    #[test]
    fn test_nested_interpolation() {
        let mut vars = BTreeMap::new();
        vars.insert("inner".to_string(), "value".to_string());
        vars.insert("outer".to_string(), "${inner}".to_string());

        let result = interpolate("Result: ${outer}", &vars).unwrap();
        assert_eq!(result, "Result: value");
    }

    #[test]
    fn test_self_reference_is_recursive() {
        let mut vars = BTreeMap::new();
        vars.insert("loop".to_string(), "${loop}".to_string());

        let result = interpolate("${loop}", &vars);
        assert!(matches!(result, Err(InterpolationError::RecursiveInterpolation)));
    }

    #[test]
    fn test_empty_variable_name() {
        let vars = BTreeMap::new();
        let result = interpolate("Value: ${}", &vars).unwrap();
        assert_eq!(result, "Value: ${}");
    }

    #[test]
    fn test_interpolate_list() {
        let mut vars = BTreeMap::new();
        vars.insert("name".to_string(), "test".to_string());

        let list = vec!["file-${name}.txt".to_string(), "static.txt".to_string()];

        let result = interpolate_list(&list, &vars).unwrap();
        assert_eq!(result, vec!["file-test.txt", "static.txt"]);
    }
}
