//! The command step aggregate

use crate::error::StepResult;
use crate::step::directive::Gate;
use crate::step::properties::Properties;
use crate::step::tokenize::tokenize_args;
use serde_yaml::Value;

/// One configured, conditionally enabled unit of work.
///
/// The argument string is tokenized and the keyword options are resolved once, at
/// construction. Afterwards only the command and step names can change.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandStep {
    command_name: String,
    step_name: String,
    args: Vec<String>,
    enabled: bool,
    properties: Properties,
}

impl CommandStep {
    /// Build a step from its names, argument string and ordered keyword options.
    ///
    /// Fails with a malformed-arguments error when `arg_string` cannot be tokenized.
    pub fn new<K, I>(
        command_name: impl Into<String>,
        step_name: impl Into<String>,
        arg_string: &str,
        options: I,
    ) -> StepResult<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let args = tokenize_args(arg_string)?;
        let gate = Gate::resolve(options)?;

        Ok(CommandStep {
            command_name: command_name.into(),
            step_name: step_name.into(),
            args,
            enabled: gate.enabled,
            properties: gate.properties,
        })
    }

    /// Build a step with no step name, arguments or options
    #[cfg(test)]
    pub(crate) fn bare(command_name: impl Into<String>) -> Self {
        CommandStep {
            command_name: command_name.into(),
            step_name: String::new(),
            args: Vec::new(),
            enabled: true,
            properties: Properties::new(),
        }
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn set_command_name(&mut self, name: impl Into<String>) {
        self.command_name = name.into();
    }

    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    pub fn set_step_name(&mut self, name: impl Into<String>) {
        self.step_name = name.into();
    }

    /// Argument tokens in source order
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Step name if set, otherwise the command name
    pub fn label(&self) -> &str {
        if self.step_name.is_empty() {
            &self.command_name
        } else {
            &self.step_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StepError;

    fn no_options() -> Vec<(String, Value)> {
        Vec::new()
    }

    #[test]
    fn test_new_tokenizes_arguments() {
        let step = CommandStep::new("install", "web", "5 'abc' foo + 1", no_options()).unwrap();

        assert_eq!(step.command_name(), "install");
        assert_eq!(step.step_name(), "web");
        assert_eq!(step.args(), &["5", "'abc'", "foo", "+", "1"]);
        assert!(step.enabled());
        assert!(step.properties().is_empty());
    }

    #[test]
    fn test_defaults() {
        let step = CommandStep::new("noop", "", "", no_options()).unwrap();
        assert_eq!(step.step_name(), "");
        assert!(step.args().is_empty());
        assert!(step.enabled());
        assert_eq!(step, CommandStep::bare("noop"));
    }

    #[test]
    fn test_malformed_arguments_abort_construction() {
        let result = CommandStep::new("install", "", "'open", no_options());
        assert!(matches!(result, Err(StepError::MalformedArguments { .. })));
    }

    #[test]
    fn test_properties_and_gate() {
        let step = CommandStep::new(
            "package",
            "",
            "nginx",
            vec![
                ("state", Value::from("present")),
                ("disabled", Value::from(true)),
                ("enabled", Value::from(true)),
            ],
        )
        .unwrap();

        assert!(step.enabled());
        assert_eq!(step.properties().len(), 1);
        assert_eq!(step.properties().get_str("state"), Some("present"));
    }

    #[test]
    fn test_name_setters() {
        let mut step = CommandStep::bare("first");
        assert_eq!(step.label(), "first");

        step.set_command_name("second");
        step.set_step_name("labelled");

        assert_eq!(step.command_name(), "second");
        assert_eq!(step.step_name(), "labelled");
        assert_eq!(step.label(), "labelled");
    }
}
