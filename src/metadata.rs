//! Package metadata read from the repository's `package.json`.

use crate::error::{ReleaseError, Result};
use serde::Deserialize;
use std::path::Path;

/// Fields of `package.json` the release workflow cares about
#[derive(Debug, Clone, Deserialize)]
pub struct PackageJson {
    /// Package name
    pub name: Option<String>,
    /// Declared version
    pub version: Option<String>,
}

/// Load `<root>/package.json`
pub fn load_package_json(root: &Path) -> Result<PackageJson> {
    let path = root.join("package.json");
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ReleaseError::signal(format!(
                "No package.json found at {}",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}

/// The `version` declared in `<root>/package.json`
pub fn package_json_version(root: &Path) -> Result<String> {
    load_package_json(root)?
        .version
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            ReleaseError::signal(format!(
                "package.json in {} has no version field",
                root.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_version() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "widgets", "version": "1.4.2", "private": true }"#,
        )
        .unwrap();

        assert_eq!(package_json_version(dir.path()).unwrap(), "1.4.2");
        let package = load_package_json(dir.path()).unwrap();
        assert_eq!(package.name.as_deref(), Some("widgets"));
    }

    #[test]
    fn test_missing_file_is_signal() {
        let dir = tempfile::tempdir().unwrap();
        let err = package_json_version(dir.path()).unwrap_err();
        assert!(err.as_signal().is_some());
    }

    #[test]
    fn test_missing_version_is_signal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{ "name": "widgets" }"#).unwrap();
        let err = package_json_version(dir.path()).unwrap_err();
        assert!(err.to_string().contains("has no version field"));
    }

    #[test]
    fn test_malformed_json_is_unexpected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{ not json").unwrap();
        let err = package_json_version(dir.path()).unwrap_err();
        assert!(matches!(err, ReleaseError::Json { .. }));
    }
}
