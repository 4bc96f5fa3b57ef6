//! Owner/repo extraction from git remote URLs

use crate::error::{ReleaseError, Result};

/// Parse GitHub owner/repo from a git remote URL
///
/// Supports Git URL formats:
/// - SSH SCP-like: git@github.com:owner/repo.git
/// - HTTPS: https://github.com/owner/repo.git
/// - SSH URL: ssh://git@github.com/owner/repo.git
pub fn parse_github_url(url: &str) -> Result<(String, String)> {
    let url = url.trim();

    // SSH SCP-like format: git@github.com:owner/repo.git
    if url.contains('@')
        && !url.contains("://")
        && let Some((_, path)) = url.split_once(':')
        && let Some(pair) = split_owner_repo(path)
    {
        return Ok(pair);
    }

    // HTTPS and ssh:// URLs
    if let Some(path_start) = url.find("github.com/")
        && let Some(pair) = split_owner_repo(&url[path_start + "github.com/".len()..])
    {
        return Ok(pair);
    }

    Err(ReleaseError::signal(format!(
        "Could not parse GitHub owner/repo from remote URL: '{}'",
        url
    )))
}

fn split_owner_repo(path: &str) -> Option<(String, String)> {
    let path = path.trim_end_matches('/').trim_end_matches(".git");
    let mut parts = path.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Some((owner.to_string(), repo.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(owner: &str, repo: &str) -> (String, String) {
        (owner.to_string(), repo.to_string())
    }

    #[test]
    fn test_ssh_scp_url() {
        assert_eq!(
            parse_github_url("git@github.com:acme/widgets.git").unwrap(),
            pair("acme", "widgets")
        );
    }

    #[test]
    fn test_https_url() {
        assert_eq!(
            parse_github_url("https://github.com/acme/widgets.git").unwrap(),
            pair("acme", "widgets")
        );
        assert_eq!(
            parse_github_url("https://github.com/acme/widgets").unwrap(),
            pair("acme", "widgets")
        );
    }

    #[test]
    fn test_ssh_scheme_url() {
        assert_eq!(
            parse_github_url("ssh://git@github.com/acme/widgets.git").unwrap(),
            pair("acme", "widgets")
        );
    }

    #[test]
    fn test_unparseable_url_is_signal() {
        let err = parse_github_url("/srv/git/widgets.git").unwrap_err();
        assert!(err.as_signal().is_some());
    }
}
