//! `GitOperations` backed by the git command line

use crate::error::{GitError, ReleaseError, Result};
use crate::git::GitOperations;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs the system `git` binary in a fixed working directory
#[derive(Debug, Clone)]
pub struct CliGit {
    program: PathBuf,
    work_dir: PathBuf,
}

impl CliGit {
    /// Locate `git` on PATH and bind it to `work_dir`
    pub fn open<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let program = which::which("git").map_err(|e| GitError::NotInstalled {
            reason: e.to_string(),
        })?;
        let git = Self {
            program,
            work_dir: work_dir.as_ref().to_path_buf(),
        };

        // Fail early, and with a readable message, outside a repository
        if let Err(e) = git.run(&["rev-parse", "--git-dir"]) {
            log::debug!("repository check failed: {}", e);
            return Err(ReleaseError::signal(format!(
                "{} is not inside a git repository",
                git.work_dir.display()
            )));
        }

        Ok(git)
    }

    /// Working directory git runs in
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

impl GitOperations for CliGit {
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        log::debug!("git {} (in {})", command, self.work_dir.display());

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                command: command.clone(),
                work_dir: self.work_dir.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|_| GitError::InvalidOutput { command })?;
        Ok(stdout.trim().to_string())
    }
}
