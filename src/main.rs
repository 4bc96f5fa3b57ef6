//! Kodegen Release Steps - scripted git tagging and GitHub releases.
//!
//! The sequencer and prompt gateway are built once here and passed down;
//! any error that escapes a command is handed to the error boundary, which
//! exits with status 1.

use kodegen_release_steps::cli::{self, Args};
use kodegen_release_steps::{ErrorBoundary, PromptGateway, StepSequencer, TerminalOperator, TerminalStatus};

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse_args();
    let prompts = PromptGateway::new(TerminalOperator::new());
    let mut status = StepSequencer::new(TerminalStatus::stdout());

    if let Err(e) = cli::run(args, &prompts, &mut status).await {
        ErrorBoundary::new().on_error(&mut status, e);
    }
}
