//! Pipeline construction and execution
//!
//! A pipeline is the ordered list of actions built from a configuration. Each step
//! is constructed once; running it checks the resolved gate and calls `execute`.

use crate::config::{Config, StepConfig};
use crate::error::{ConfigError, ConfigResult, ExecutionResult};
use crate::runner::{build_action, interpolate, Context};
use crate::step::{CommandStep, Executable};
use serde_yaml::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Built pipeline ready to run
pub struct Pipeline {
    /// Pipeline name
    pub name: Option<String>,

    actions: Vec<Box<dyn Executable>>,
}

/// What happened to a step during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Executed,
    Skipped,
    WouldExecute,
}

/// Per-step record of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<(String, StepOutcome)>,
}

impl RunReport {
    pub fn count(&self, outcome: StepOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }
}

impl Pipeline {
    /// Build every step of `config`, in order.
    ///
    /// String option values are interpolated with `vars` before the step resolves
    /// its directives, so `if_file_exists: ${home}/.profile` works.
    pub fn from_config(config: &Config, vars: &BTreeMap<String, String>) -> ConfigResult<Self> {
        let actions = config
            .steps
            .iter()
            .map(|step_config| {
                let step = build_step(step_config, vars)?;
                build_action(step)
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Pipeline {
            name: config.name.clone(),
            actions,
        })
    }

    /// Resolved steps in execution order
    pub fn steps(&self) -> impl Iterator<Item = &CommandStep> {
        self.actions.iter().map(|a| a.step())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run every enabled step in order, stopping at the first failure
    pub fn run(&self, ctx: &mut Context) -> ExecutionResult<RunReport> {
        let mut report = RunReport::default();

        for action in &self.actions {
            let label = action.step().label().to_string();

            let outcome = if !action.enabled() {
                info!("Skipping disabled step: {}", label);
                StepOutcome::Skipped
            } else if ctx.dry_run {
                info!("Would run step: {}", label);
                StepOutcome::WouldExecute
            } else {
                info!("Running step: {}", label);
                action.execute(ctx)?;
                debug!("Step completed: {}", label);
                StepOutcome::Executed
            };

            report.outcomes.push((label, outcome));
        }

        Ok(report)
    }
}

/// Construct the command step for one step definition
pub fn build_step(
    step_config: &StepConfig,
    vars: &BTreeMap<String, String>,
) -> ConfigResult<CommandStep> {
    let wrap = |source| ConfigError::Step {
        step: step_config.label().to_string(),
        source,
    };

    let options = step_config
        .option_pairs()?
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => match interpolate(&s, vars) {
                Ok(s) => Ok((key, Value::String(s))),
                Err(e) => Err(ConfigError::Invalid(format!("option '{}': {}", key, e))),
            },
            other => Ok((key, other)),
        })
        .collect::<ConfigResult<Vec<_>>>()?;

    let step = CommandStep::new(
        step_config.command.clone(),
        step_config.name.clone().unwrap_or_default(),
        step_config.args.as_deref().unwrap_or(""),
        options,
    )
    .map_err(wrap)?;

    debug!(
        "Resolved step {}: enabled={}, {} properties",
        step.label(),
        step.enabled(),
        step.properties().len()
    );
    Ok(step)
}
