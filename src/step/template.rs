//! Template rendering into files
//!
//! Templates use Jinja2 syntax through minijinja: `{{ name }}` interpolation,
//! `{% if %}` and `{% for %}` blocks, filters. Output is plain text with no
//! auto-escaping. Undefined variables render as empty strings; looking up an
//! attribute on an undefined value is an error.

use crate::error::{StepError, StepResult};
use crate::step::files::file_exists;
use minijinja::Environment;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Where the template text comes from
#[derive(Debug, Clone, Copy)]
pub enum TemplateSource<'a> {
    File(&'a Path),
    Contents(&'a str),
}

impl<'a> TemplateSource<'a> {
    /// Pick the single template source from two optional inputs.
    ///
    /// Exactly one must be given; none or both is an invalid argument.
    pub fn from_options(
        template_file: Option<&'a Path>,
        template_contents: Option<&'a str>,
    ) -> StepResult<Self> {
        match (template_file, template_contents) {
            (Some(path), None) => Ok(TemplateSource::File(path)),
            (None, Some(contents)) => Ok(TemplateSource::Contents(contents)),
            (None, None) => Err(StepError::InvalidArgument(
                "must specify a template path or template contents".to_string(),
            )),
            (Some(_), Some(_)) => Err(StepError::InvalidArgument(
                "cannot specify both template path and template contents".to_string(),
            )),
        }
    }

    /// Load the template text
    pub fn load(&self) -> StepResult<String> {
        match self {
            TemplateSource::File(path) => {
                if !file_exists(path) {
                    return Err(StepError::FileNotFound(path.to_path_buf()));
                }
                fs::read_to_string(path).map_err(|e| StepError::io(*path, e))
            }
            TemplateSource::Contents(contents) => Ok(contents.to_string()),
        }
    }
}

/// Render a template string against `context`
pub fn render_str<C: Serialize>(source: &str, context: &C) -> StepResult<String> {
    let env = Environment::new();
    Ok(env.render_str(source, context)?)
}

/// Render a template and write the result to `output_path`, replacing any existing file.
///
/// Exactly one of `template_file` and `template_contents` must be given.
pub fn render_template<C: Serialize>(
    output_path: impl AsRef<Path>,
    template_file: Option<&Path>,
    template_contents: Option<&str>,
    context: &C,
) -> StepResult<()> {
    let source = TemplateSource::from_options(template_file, template_contents)?;
    render_template_from(output_path, source, context)
}

/// Render from an already chosen [`TemplateSource`] and write to `output_path`
pub fn render_template_from<C: Serialize>(
    output_path: impl AsRef<Path>,
    source: TemplateSource<'_>,
    context: &C,
) -> StepResult<()> {
    let output_path = output_path.as_ref();
    let template = source.load()?;
    let rendered = render_str(&template, context)?;
    fs::write(output_path, rendered).map_err(|e| StepError::io(output_path, e))
}
