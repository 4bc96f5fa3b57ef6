//! Command line interface.
//!
//! Argument parsing, operator-facing output and command dispatch.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use commands::execute_command;
pub use output::{OutputManager, stderr_color, stdout_color};

use crate::error::Result;
use crate::prompt::{Operator, PromptGateway};
use crate::status::{StatusDisplay, StepSequencer};

/// Main CLI entry point
pub async fn run<O, D>(
    args: Args,
    prompts: &PromptGateway<O>,
    status: &mut StepSequencer<D>,
) -> Result<()>
where
    O: Operator,
    D: StatusDisplay,
{
    execute_command(args, prompts, status).await
}
