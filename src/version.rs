//! Release version helpers: tag naming, tag recognition and validation.

use crate::error::{ReleaseError, Result};
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

/// Whether `name` looks like a release tag: `v` followed by dot-separated
/// segments that each start with a digit (`v1.2.3`, `v2.0.0-rc1`, `v10`).
pub fn is_version_tag(name: &str) -> bool {
    static VERSION_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^v\d[^.]*(\.\d[^.]*)*$").expect("version tag regex is valid")
    });
    VERSION_TAG_RE.is_match(name)
}

/// Tag name for `version`
pub fn tag_name(version: &Version) -> String {
    format!("v{}", version)
}

/// Parse an operator-supplied version, accepting an optional leading `v`.
///
/// Invalid input is an expected failure, not a bug.
pub fn parse_version(text: &str) -> Result<Version> {
    let trimmed = text.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(bare).map_err(|e| {
        ReleaseError::signal(format!("'{}' is not a valid semantic version: {}", trimmed, e))
    })
}

/// Highest semantic version among `tags`, ignoring tags that do not parse
pub fn latest_version_tag<'a, I>(tags: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter()
        .filter(|t| is_version_tag(t))
        .filter_map(|t| Version::parse(&t[1..]).ok().map(|v| (v, t)))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, t)| t)
}
