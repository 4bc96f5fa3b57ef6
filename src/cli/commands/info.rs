//! Repository overview.

use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::git::GitOperations;
use crate::github::{GitHubRepo, parse_github_url};
use crate::metadata::package_json_version;
use crate::version::latest_version_tag;
use std::path::Path;

/// Print what a release would start from
pub(super) async fn execute_info<G: GitOperations>(config: &RuntimeConfig, git: &G) -> Result<()> {
    let output = config.output();
    output.title("Repository");

    let root = git.root_folder()?;
    output.info(&format!("Root:    {}", root));
    output.info(&format!("Branch:  {}", git.current_branch()?));

    let slug = match git.remote_url(&config.remote) {
        Ok(url) => {
            output.info(&format!("Remote:  {} ({})", config.remote, url));
            match parse_github_url(&url) {
                Ok((owner, repo)) => Some((owner, repo)),
                Err(e) => {
                    output.warn(&e.to_string());
                    None
                }
            }
        }
        Err(e) => {
            log::debug!("remote lookup failed: {}", e);
            output.warn(&format!("Remote '{}' is not configured", config.remote));
            None
        }
    };

    match package_json_version(Path::new(&root)) {
        Ok(version) => output.info(&format!("Package: {}", version)),
        Err(e) => output.warn(&e.to_string()),
    }

    let tags = git.version_tags()?;
    match latest_version_tag(tags.iter().map(String::as_str)) {
        Some(tag) => output.info(&format!("Latest tag: {}", tag)),
        None => output.info("Latest tag: none"),
    }
    output.verbose(&format!("{} version tag(s) found", tags.len()));

    // Published releases need the API; only ask when we can authenticate
    if let Some((owner, repo)) = slug
        && config.token.is_some()
    {
        let mut github = GitHubRepo::new(owner, repo, config.token.clone())?;
        if let Some(api_url) = &config.api_url {
            github = github.with_api_base(api_url.as_str());
        }
        match github.latest_release_tag().await {
            Ok(Some(tag)) => output.info(&format!("Latest GitHub release: {}", tag)),
            Ok(None) => output.info("Latest GitHub release: none"),
            Err(e) => {
                log::debug!("{}", e.diagnostic());
                output.error(&format!("Could not query {}: {}", github.slug(), e));
            }
        }
    }

    Ok(())
}
