//! Command execution.
//!
//! Commands never handle their own failures: every error propagates to the
//! caller, which hands it to the [`ErrorBoundary`](crate::ErrorBoundary).

mod info;
mod release;

pub use release::{ReleaseContext, ReleaseOptions, ReleaseSummary, execute_release, is_affirmative};

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{ReleaseError, Result};
use crate::git::{CliGit, GitOperations};
use crate::github::{GitHubRepo, parse_github_url};
use crate::prompt::{Operator, PromptGateway};
use crate::status::{StatusDisplay, StepSequencer};

use info::execute_info;

/// Execute the command selected by `args`
pub async fn execute_command<O, D>(
    args: Args,
    prompts: &PromptGateway<O>,
    status: &mut StepSequencer<D>,
) -> Result<()>
where
    O: Operator,
    D: StatusDisplay,
{
    args.validate()
        .map_err(|reason| ReleaseError::signal(format!("Invalid arguments: {}", reason)))?;

    let config = RuntimeConfig::from(&args);
    let git = CliGit::open(&config.repo)?;
    log::debug!("running '{}' in {}", args.command.name(), git.work_dir().display());

    match args.command {
        Command::Info => execute_info(&config, &git).await,
        Command::Release {
            version,
            yes,
            no_push,
            no_github,
            draft,
            notes,
        } => {
            let publisher = if no_github {
                None
            } else {
                Some(github_repo(&config, &git)?)
            };

            let options = ReleaseOptions {
                version,
                assume_yes: yes,
                push: !no_push,
                draft,
                notes,
            };
            let mut ctx = ReleaseContext {
                git: &git,
                prompts,
                status,
                output: config.output(),
                remote: &config.remote,
            };

            let summary = execute_release(&mut ctx, &options, publisher.as_ref()).await?;
            report_summary(&config, &summary);
            Ok(())
        }
    }
}

/// GitHub handle for the repository behind the configured remote
fn github_repo<G: GitOperations>(config: &RuntimeConfig, git: &G) -> Result<GitHubRepo> {
    let remote_url = git.remote_url(&config.remote).map_err(|_| {
        ReleaseError::signal(format!("Git remote '{}' is not configured", config.remote))
    })?;
    let (owner, repo) = parse_github_url(&remote_url)?;

    let github = GitHubRepo::new(owner, repo, config.token.clone())?;
    Ok(match &config.api_url {
        Some(api_url) => github.with_api_base(api_url.as_str()),
        None => github,
    })
}

fn report_summary(config: &RuntimeConfig, summary: &ReleaseSummary) {
    let output = config.output();
    output.println("");
    output.success(&format!("Released {}", summary.tag));
    if summary.pushed {
        output.indent(&format!("Pushed to {}", config.remote));
    } else {
        output.indent("Tag created locally only");
    }
    if let Some(url) = &summary.release_url {
        output.indent(&format!("GitHub release: {}", url));
    }
}
