//! Git operations needed by release workflows.
//!
//! Implementors only provide [`GitOperations::run`]; every other operation is
//! a thin wrapper around a single git invocation.

use crate::error::Result;
use crate::version::is_version_tag;

/// Trait defining the git operations release workflows rely on
pub trait GitOperations {
    /// Run `git <args>` synchronously and return trimmed stdout.
    ///
    /// A non-zero exit status is an error carrying stderr.
    fn run(&self, args: &[&str]) -> Result<String>;

    /// Name of the checked-out branch
    fn current_branch(&self) -> Result<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Absolute path of the repository root
    fn root_folder(&self) -> Result<String> {
        self.run(&["rev-parse", "--show-toplevel"])
    }

    /// Configured URL of `remote`
    fn remote_url(&self, remote: &str) -> Result<String> {
        let key = format!("remote.{}.url", remote);
        self.run(&["config", "--get", &key])
    }

    /// All local tag names
    fn tags(&self) -> Result<Vec<String>> {
        let output = self.run(&["tag", "--list"])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Local tags that look like release versions, in git's listing order
    fn version_tags(&self) -> Result<Vec<String>> {
        Ok(self
            .tags()?
            .into_iter()
            .filter(|t| is_version_tag(t))
            .collect())
    }

    /// Whether a local tag named `tag` exists
    fn tag_exists(&self, tag: &str) -> Result<bool> {
        Ok(self.tags()?.iter().any(|t| t == tag))
    }

    /// Whether the working tree has no uncommitted changes
    fn is_clean(&self) -> Result<bool> {
        Ok(self.run(&["status", "--porcelain"])?.is_empty())
    }

    /// Create an annotated tag on HEAD
    fn create_tag(&self, tag: &str, message: &str) -> Result<()> {
        self.run(&["tag", "-a", tag, "-m", message]).map(drop)
    }

    /// Push a single tag to `remote`
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.run(&["push", remote, tag]).map(drop)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::GitError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory git answering from canned outputs and recording calls
    #[derive(Default)]
    pub struct FakeGit {
        responses: HashMap<String, std::result::Result<String, String>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeGit {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, command: &str, output: &str) -> Self {
            self.responses
                .insert(command.to_string(), Ok(output.to_string()));
            self
        }

        pub fn fail(mut self, command: &str, stderr: &str) -> Self {
            self.responses
                .insert(command.to_string(), Err(stderr.to_string()));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl GitOperations for FakeGit {
        fn run(&self, args: &[&str]) -> Result<String> {
            let command = args.join(" ");
            self.calls.borrow_mut().push(command.clone());
            match self.responses.get(&command) {
                Some(Ok(output)) => Ok(output.trim().to_string()),
                Some(Err(stderr)) => Err(GitError::CommandFailed {
                    command,
                    status: 1,
                    stderr: stderr.clone(),
                }
                .into()),
                // Unscripted commands succeed silently
                None => Ok(String::new()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeGit;
    use super::*;

    #[test]
    fn test_remote_url_uses_config_key() {
        let git = FakeGit::new().respond(
            "config --get remote.upstream.url",
            "git@github.com:acme/widgets.git\n",
        );
        assert_eq!(
            git.remote_url("upstream").unwrap(),
            "git@github.com:acme/widgets.git"
        );
    }

    #[test]
    fn test_version_tags_filters_non_versions() {
        let git = FakeGit::new().respond("tag --list", "v1.0.0\nnightly\nv1.1.0\nvnext\n");
        assert_eq!(git.version_tags().unwrap(), vec!["v1.0.0", "v1.1.0"]);
    }

    #[test]
    fn test_tag_exists_matches_exact_names() {
        let git = FakeGit::new().respond("tag --list", "v1.0.0\nv1.0.0-rc1\n");
        assert!(git.tag_exists("v1.0.0").unwrap());
        assert!(!git.tag_exists("v1.0").unwrap());
    }

    #[test]
    fn test_is_clean_checks_porcelain_output() {
        let dirty = FakeGit::new().respond("status --porcelain", " M src/lib.rs");
        assert!(!dirty.is_clean().unwrap());
        assert!(FakeGit::new().is_clean().unwrap());
    }

    #[test]
    fn test_create_tag_is_annotated() {
        let git = FakeGit::new();
        git.create_tag("v2.0.0", "Release v2.0.0").unwrap();
        assert_eq!(git.calls(), vec!["tag -a v2.0.0 -m Release v2.0.0"]);
    }

    #[test]
    fn test_failed_command_propagates() {
        let git = FakeGit::new().fail("push origin v2.0.0", "rejected");
        assert!(git.push_tag("origin", "v2.0.0").is_err());
    }
}
