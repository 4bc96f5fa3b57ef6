//! GitHub integration for release operations

mod client;
mod remote;

pub use client::{DEFAULT_API_BASE, GitHubRepo, PublishedRelease, ReleasePublisher, ReleaseRequest};
pub use remote::parse_github_url;
