//! # Kodegen Release Steps
//!
//! Scripted git tagging and GitHub release workflows with step-by-step
//! operator feedback.
//!
//! The crate is built around three pieces:
//!
//! - [`StepSequencer`]: a FIFO queue of step labels with exactly one step in
//!   flight, rendered as a linear transcript.
//! - [`PromptGateway`]: serialized free-text and yes/no questions with
//!   default handling.
//! - [`ErrorBoundary`]: the single place errors end up, separating expected
//!   [`ErrorSignal`]s from unexpected failures.
//!
//! ## Usage
//!
//! ```bash
//! kodegen_release_steps info
//! kodegen_release_steps release                  # asks for the version
//! kodegen_release_steps release --version 1.4.0 --yes
//! kodegen_release_steps release --no-push --no-github
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod boundary;
pub mod cli;
pub mod error;
pub mod git;
pub mod github;
pub mod metadata;
pub mod prompt;
pub mod status;
pub mod version;

pub use boundary::ErrorBoundary;
pub use cli::Args;
pub use error::{ErrorSignal, ReleaseError, Result, Trace};
pub use git::{CliGit, GitOperations};
pub use github::{GitHubRepo, ReleasePublisher};
pub use prompt::{Operator, PromptGateway, Question, QuestionKind, TerminalOperator};
pub use status::{StatusDisplay, StepHandle, StepOutcome, StepSequencer, TerminalStatus};
