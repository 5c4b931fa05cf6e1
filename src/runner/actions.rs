//! Built-in step actions
//!
//! Each action wraps a resolved [`CommandStep`] and implements [`Executable`].
//! [`build_action`] picks the action from the step's command name.

use crate::error::{ConfigError, ConfigResult, ExecutionError, ExecutionResult};
use crate::runner::{interpolate, interpolate_list, run_shell, Context};
use crate::step::{render_template_from, unquote_or_raw, write_file, CommandStep, Executable, TemplateSource};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Command names with a built-in action
pub const BUILTIN_COMMANDS: &[&str] = &["shell", "echo", "file", "template"];

/// Build the action for a step, keyed by its command name
pub fn build_action(step: CommandStep) -> ConfigResult<Box<dyn Executable>> {
    match step.command_name() {
        "shell" => Ok(Box::new(ShellAction { step })),
        "echo" => Ok(Box::new(EchoAction { step })),
        "file" => Ok(Box::new(FileAction { step })),
        "template" => Ok(Box::new(TemplateAction { step })),
        other => Err(ConfigError::UnknownCommand(other.to_string())),
    }
}

/// Decode string-literal args and interpolate variables
fn expanded_args(step: &CommandStep, ctx: &Context) -> ExecutionResult<Vec<String>> {
    let raw: Vec<String> = step.args().iter().map(|a| unquote_or_raw(a)).collect();
    Ok(interpolate_list(&raw, &ctx.vars)?)
}

fn required_str<'a>(step: &'a CommandStep, property: &str) -> ExecutionResult<&'a str> {
    step.properties()
        .get_str(property)
        .ok_or_else(|| ExecutionError::MissingProperty {
            step: step.label().to_string(),
            property: property.to_string(),
        })
}

fn expanded_path(raw: &str, base: &Path, ctx: &Context) -> ExecutionResult<PathBuf> {
    Ok(base.join(interpolate(raw, &ctx.vars)?))
}

/// Runs its arguments as one command line through the interpreter.
///
/// Properties: `dir` (working directory), `quiet` (suppress stdout and echo).
pub struct ShellAction {
    step: CommandStep,
}

impl Executable for ShellAction {
    fn step(&self) -> &CommandStep {
        &self.step
    }

    fn execute(&self, ctx: &mut Context) -> ExecutionResult<()> {
        let command_line = expanded_args(&self.step, ctx)?.join(" ");
        let props = self.step.properties();
        let dir = props
            .get_str("dir")
            .map(|d| interpolate(d, &ctx.vars))
            .transpose()?;
        let quiet = props.get_bool("quiet").unwrap_or(false);

        run_shell(&command_line, dir.as_deref().map(Path::new), quiet, ctx)
    }
}

/// Prints its arguments on one line
pub struct EchoAction {
    step: CommandStep,
}

impl Executable for EchoAction {
    fn step(&self) -> &CommandStep {
        &self.step
    }

    fn execute(&self, ctx: &mut Context) -> ExecutionResult<()> {
        println!("{}", expanded_args(&self.step, ctx)?.join(" "));
        Ok(())
    }
}

/// Writes the `lines` property (or a single `content` string) to `path`.
///
/// Properties: `path` (required), `lines` or `content`, `overwrite` (default false).
pub struct FileAction {
    step: CommandStep,
}

impl FileAction {
    fn lines(&self, ctx: &Context) -> ExecutionResult<Vec<String>> {
        let props = self.step.properties();
        let raw: Vec<String> = match (props.get("lines"), props.get_str("content")) {
            (Some(Value::Sequence(items)), _) => items.iter().map(scalar_text).collect(),
            (_, Some(content)) => content.lines().map(str::to_string).collect(),
            _ => {
                return Err(ExecutionError::MissingProperty {
                    step: self.step.label().to_string(),
                    property: "lines".to_string(),
                })
            }
        };
        Ok(interpolate_list(&raw, &ctx.vars)?)
    }
}

impl Executable for FileAction {
    fn step(&self) -> &CommandStep {
        &self.step
    }

    fn execute(&self, ctx: &mut Context) -> ExecutionResult<()> {
        let path = expanded_path(required_str(&self.step, "path")?, &ctx.working_dir, ctx)?;
        let overwrite = self.step.properties().get_bool("overwrite").unwrap_or(false);
        let lines = self.lines(ctx)?;

        debug!("Writing {} lines to {}", lines.len(), path.display());
        write_file(&path, &lines, overwrite)?;
        Ok(())
    }
}

/// Renders `template` (inline) or `template_file` to `output`.
///
/// The template sees pipeline variables overlaid by the step's own properties.
pub struct TemplateAction {
    step: CommandStep,
}

impl TemplateAction {
    fn context(&self, ctx: &Context) -> Mapping {
        let mut mapping = Mapping::new();
        for (key, value) in &ctx.vars {
            mapping.insert(Value::from(key.as_str()), Value::from(value.as_str()));
        }
        for (key, value) in self.step.properties().iter() {
            mapping.insert(Value::from(key), value.clone());
        }
        mapping
    }
}

impl Executable for TemplateAction {
    fn step(&self) -> &CommandStep {
        &self.step
    }

    fn execute(&self, ctx: &mut Context) -> ExecutionResult<()> {
        let ctx = &*ctx;
        let props = self.step.properties();
        let output = expanded_path(required_str(&self.step, "output")?, &ctx.working_dir, ctx)?;

        let template_file = props
            .get_str("template_file")
            .map(|f| expanded_path(f, &ctx.config_dir(), ctx))
            .transpose()?;
        let source = TemplateSource::from_options(template_file.as_deref(), props.get_str("template"))?;

        debug!("Rendering template to {}", output.display());
        render_template_from(&output, source, &self.context(ctx))?;
        Ok(())
    }
}

/// Text of a scalar YAML value; other values are rendered as YAML
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
