//! Git integration for release workflows.
//!
//! Workflows talk to git through the [`GitOperations`] trait: a synchronous
//! command that either yields trimmed stdout or fails.

mod cli_git;
mod operations;

pub use cli_git::CliGit;
pub use operations::GitOperations;

#[cfg(test)]
pub(crate) use operations::testing;
