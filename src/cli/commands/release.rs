//! Release command: tag, push and publish.
//!
//! The whole plan is declared to the step sequencer up front and each step is
//! reported as its git or API call returns. Prompts happen before the plan
//! starts and, when the working tree is dirty, between steps.

use crate::cli::OutputManager;
use crate::error::{ReleaseError, Result};
use crate::git::GitOperations;
use crate::github::{ReleasePublisher, ReleaseRequest};
use crate::metadata::package_json_version;
use crate::prompt::{Operator, PromptGateway};
use crate::status::{StatusDisplay, StepOutcome, StepSequencer};
use crate::version::{parse_version, tag_name};
use std::path::Path;

/// What the operator asked for on the command line
#[derive(Debug, Clone, Default)]
pub struct ReleaseOptions {
    /// Version to release; asked for when `None`
    pub version: Option<String>,
    /// Skip confirmations
    pub assume_yes: bool,
    /// Push the tag to the remote
    pub push: bool,
    /// Create the hosted release as a draft
    pub draft: bool,
    /// Release notes body
    pub notes: Option<String>,
}

/// Collaborators a release runs against
pub struct ReleaseContext<'a, G, O, D>
where
    G: GitOperations,
    O: Operator,
    D: StatusDisplay,
{
    /// Git command runner
    pub git: &'a G,
    /// Operator prompts
    pub prompts: &'a PromptGateway<O>,
    /// Step reporter
    pub status: &'a mut StepSequencer<D>,
    /// Plain output
    pub output: &'a OutputManager,
    /// Remote to push to
    pub remote: &'a str,
}

/// Result of a completed release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// Created tag
    pub tag: String,
    /// Whether the tag was pushed
    pub pushed: bool,
    /// URL of the hosted release, when one was created
    pub release_url: Option<String>,
}

/// Whether a confirmation answer means yes
///
/// Confirmations come back as raw text; this is where a release decides which
/// spellings it accepts.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Run the release plan
pub async fn execute_release<G, O, D, P>(
    ctx: &mut ReleaseContext<'_, G, O, D>,
    options: &ReleaseOptions,
    publisher: Option<&P>,
) -> Result<ReleaseSummary>
where
    G: GitOperations,
    O: Operator,
    D: StatusDisplay,
    P: ReleasePublisher,
{
    let branch = ctx.git.current_branch()?;
    let root = ctx.git.root_folder()?;

    let version_text = match &options.version {
        Some(version) => version.clone(),
        None => {
            let default = match package_json_version(Path::new(&root)) {
                Ok(version) => Some(version),
                Err(e) if e.as_signal().is_some() => {
                    ctx.output.verbose(&e.to_string());
                    None
                }
                Err(e) => return Err(e),
            };
            ctx.prompts
                .question("Version to release?", default.as_deref())
                .await?
        }
    };
    if version_text.trim().is_empty() {
        return Err(ReleaseError::signal("No version given"));
    }
    let version = parse_version(&version_text)?;
    let tag = tag_name(&version);

    if ctx.git.tag_exists(&tag)? {
        return Err(ReleaseError::signal(format!("Tag {} already exists", tag)));
    }

    if !options.assume_yes {
        let target = if options.push {
            format!("Create and push tag {} from branch '{}' to {}?", tag, branch, ctx.remote)
        } else {
            format!("Create tag {} from branch '{}'?", tag, branch)
        };
        let answer = ctx.prompts.confirmation(&target, None).await?;
        if !is_affirmative(&answer) {
            return Err(ReleaseError::signal("Release aborted"));
        }
    }

    let push_label = format!("Push tag {} to {}", tag, ctx.remote);
    let release_label = format!("Create GitHub release {}", tag);
    let mut plan = vec!["Check working tree".to_string(), format!("Create tag {}", tag)];
    if options.push {
        plan.push(push_label);
        if publisher.is_some() {
            plan.push(release_label);
        }
    }
    ctx.output.verbose(&format!("Plan: {}", plan.join(" → ")));
    ctx.status.add_steps(plan);

    // Check working tree
    if ctx.git.is_clean()? {
        ctx.status.done_step(StepOutcome::Success);
    } else {
        ctx.status.done_step(StepOutcome::Failure);
        let proceed = options.assume_yes || {
            let answer = ctx
                .prompts
                .confirmation("Working tree has uncommitted changes. Tag anyway?", None)
                .await?;
            is_affirmative(&answer)
        };
        if !proceed {
            return Err(ReleaseError::signal(
                "Working tree has uncommitted changes; commit or stash them first",
            ));
        }
        ctx.output.warn("Tagging with uncommitted changes in the working tree");
    }

    // Create tag
    ctx.git.create_tag(&tag, &format!("Release {}", tag))?;
    ctx.status.done_step(StepOutcome::Success);

    if !options.push {
        return Ok(ReleaseSummary {
            tag,
            pushed: false,
            release_url: None,
        });
    }

    // Push tag
    ctx.git.push_tag(ctx.remote, &tag)?;
    ctx.status.done_step(StepOutcome::Success);

    let release_url = match publisher {
        Some(publisher) => {
            let request = ReleaseRequest {
                tag_name: tag.clone(),
                name: tag.clone(),
                body: options
                    .notes
                    .clone()
                    .unwrap_or_else(|| format!("Release {}", tag)),
                draft: options.draft,
                prerelease: !version.pre.is_empty(),
            };
            let release = publisher.create_release(&request).await?;
            ctx.status.done_step(StepOutcome::Success);
            Some(release.html_url)
        }
        None => None,
    };

    Ok(ReleaseSummary {
        tag,
        pushed: true,
        release_url,
    })
}
