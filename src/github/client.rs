//! Authenticated GitHub API handle scoped to a single repository

use crate::error::{GitHubError, ReleaseError, Result};
use anyhow::Context;
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};

/// Default public API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Release to be created on the hosting side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRequest {
    /// Existing tag the release points at
    pub tag_name: String,
    /// Release title
    pub name: String,
    /// Markdown body
    pub body: String,
    /// Create as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
}

/// Release as reported back by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublishedRelease {
    /// Release ID
    pub id: u64,
    /// Tag the release points at
    pub tag_name: String,
    /// Browser URL
    pub html_url: String,
    /// Whether the release is a draft
    #[serde(default)]
    pub draft: bool,
}

/// Something that can publish releases for a tag
#[allow(async_fn_in_trait)]
pub trait ReleasePublisher {
    /// Create a release for an already pushed tag
    async fn create_release(&self, request: &ReleaseRequest) -> Result<PublishedRelease>;
}

/// GitHub handle for one owner/repo pair
#[derive(Debug, Clone)]
pub struct GitHubRepo {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    token: String,
}

impl GitHubRepo {
    /// Create a handle for `owner/repo` authenticated with `token`
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, token: Option<String>) -> Result<Self> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ReleaseError::signal(GitHubError::MissingToken.to_string()))?;

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token,
        })
    }

    /// Point the handle at a different API endpoint (GitHub Enterprise)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// `owner/repo`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_base, self.owner, self.repo, path)
    }

    async fn send(&self, method: Method, url: String, body: Option<&ReleaseRequest>) -> Result<reqwest::Response> {
        log::debug!("{} {}", method, url);
        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json");
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|source| GitHubError::Request { url, source }.into())
    }

    async fn error_for_status(method: &'static str, url: String, response: reqwest::Response) -> ReleaseError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        GitHubError::Status {
            method,
            url,
            status,
            body,
        }
        .into()
    }

    /// Tag of the latest published release, `None` when there is none yet
    pub async fn latest_release_tag(&self) -> Result<Option<String>> {
        let url = self.url("releases/latest");
        let response = self.send(Method::GET, url.clone(), None).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let release: PublishedRelease = response
                    .json()
                    .await
                    .map_err(|source| GitHubError::Request { url, source })?;
                Ok(Some(release.tag_name))
            }
            _ => Err(Self::error_for_status("GET", url, response).await),
        }
    }
}

impl ReleasePublisher for GitHubRepo {
    async fn create_release(&self, request: &ReleaseRequest) -> Result<PublishedRelease> {
        let url = self.url("releases");
        let response = self.send(Method::POST, url.clone(), Some(request)).await?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ReleaseError::signal(format!(
                "GitHub refused to create a release for {} (it may already exist)",
                request.tag_name
            )));
        }
        if !response.status().is_success() {
            return Err(Self::error_for_status("POST", url, response).await);
        }

        let release: PublishedRelease = response
            .json()
            .await
            .map_err(|source| GitHubError::Request { url, source })?;
        log::info!("created release {} ({})", release.tag_name, release.html_url);
        Ok(release)
    }
}
