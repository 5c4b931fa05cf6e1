//! Shell command execution
//!
//! This module runs command lines through the context's interpreter.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{Context, Verbosity};
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use tracing::debug;

/// Run `command_line` through the interpreter in `dir` (or the working directory)
pub fn run_shell(
    command_line: &str,
    dir: Option<&Path>,
    quiet: bool,
    ctx: &Context,
) -> ExecutionResult<()> {
    if !quiet && ctx.verbosity >= Verbosity::Normal {
        eprintln!("[RUN] {}", command_line);
    }

    let working_dir = match dir {
        Some(dir) => ctx.resolve_path(dir),
        None => ctx.working_dir.clone(),
    };

    let Some((program, interpreter_args)) = ctx.interpreter.split_first() else {
        return Err(ExecutionError::CommandFailed(None));
    };

    let mut command = StdCommand::new(program);
    command.args(interpreter_args);
    command.arg(command_line);
    command.current_dir(&working_dir);

    command.stdin(Stdio::inherit());
    if quiet {
        command.stdout(Stdio::null());
    } else {
        command.stdout(Stdio::inherit());
    }
    command.stderr(Stdio::inherit());

    // Expose pipeline variables to the child
    for (key, value) in &ctx.vars {
        command.env(key, value);
    }

    debug!("Spawning {:?} in {}", command_line, working_dir.display());
    let status = command
        .status()
        .map_err(|_| ExecutionError::CommandFailed(None))?;

    if !status.success() {
        return Err(ExecutionError::CommandFailed(status.code()));
    }

    Ok(())
}
