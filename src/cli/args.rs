//! Command line argument parsing and validation.

use super::OutputManager;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scripted git tagging and GitHub releases with step-by-step feedback
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_release_steps",
    version,
    about = "Scripted git tagging and GitHub releases with step-by-step feedback",
    long_about = "Tag the current commit with a release version, push the tag and open a \
GitHub release, reporting every step as it happens and asking before anything destructive.

Usage:
  kodegen_release_steps info
  kodegen_release_steps release
  kodegen_release_steps release --version 1.4.0 --yes"
)]
pub struct Args {
    /// Path inside the repository to operate on
    #[arg(long, global = true, value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,

    /// Git remote to read owner/repo from and push tags to
    #[arg(long, global = true, default_value = "origin")]
    pub remote: String,

    /// GitHub token (falls back to GITHUB_TOKEN)
    #[arg(long, global = true, env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Print extra detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show branch, remote, package version and latest release tag
    Info,

    /// Tag, push and publish a release
    Release {
        /// Version to release; asked interactively when omitted
        #[arg(long)]
        version: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Create the tag locally without pushing it
        #[arg(long)]
        no_push: bool,

        /// Do not create a GitHub release
        #[arg(long)]
        no_github: bool,

        /// Create the GitHub release as a draft
        #[arg(long)]
        draft: bool,

        /// Release notes body
        #[arg(long)]
        notes: Option<String>,
    },
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Info => "info",
            Command::Release { .. } => "release",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.remote.trim().is_empty() {
            return Err("--remote must not be empty".to_string());
        }

        if let Command::Release {
            no_push,
            no_github,
            draft,
            ..
        } = &self.command
        {
            if *no_push && !*no_github {
                return Err(
                    "--no-push requires --no-github: a GitHub release needs the pushed tag"
                        .to_string(),
                );
            }
            if *draft && *no_github {
                return Err("--draft has no effect with --no-github".to_string());
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments and environment
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: OutputManager,
    /// Repository path
    pub repo: PathBuf,
    /// Remote name
    pub remote: String,
    /// GitHub token, if any
    pub token: Option<String>,
    /// API base override
    pub api_url: Option<String>,
}

impl RuntimeConfig {
    /// Build from parsed arguments, falling back to `GITHUB_TOKEN`
    pub fn from_args(args: &Args) -> Self {
        let token = args
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.trim().is_empty());

        Self {
            output: OutputManager::new(args.verbose),
            repo: args.repo.clone(),
            remote: args.remote.clone(),
            token,
            api_url: args.api_url.clone(),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &OutputManager {
        &self.output
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::from_args(args)
    }
}
