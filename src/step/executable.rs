//! The execution hook implemented by concrete step types

use crate::error::ExecutionResult;
use crate::runner::Context;
use crate::step::CommandStep;

/// A concrete step type that can be run.
///
/// By the time `execute` is called the step's arguments, gate and properties are
/// fully resolved; implementations only read them.
pub trait Executable {
    /// The resolved step this action runs for
    fn step(&self) -> &CommandStep;

    /// Perform the action
    fn execute(&self, ctx: &mut Context) -> ExecutionResult<()>;

    fn enabled(&self) -> bool {
        self.step().enabled()
    }
}
