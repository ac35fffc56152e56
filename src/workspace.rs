//! Repository workspaces: local checkouts inside the working directory.
//!
//! A workspace is reused when its directory already exists. Nothing checks
//! whether an existing checkout is clean or up to date; the branch step pulls
//! the source branch, and anything else is the operator's responsibility.
//!
//! The process working directory is never changed. The returned
//! [`Workspace`] path is passed explicitly to every later step.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::path::repository_name;
use crate::repository::GitOperations;

/// A local checkout of one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    name: String,
    path: PathBuf,
}

impl Workspace {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Clone `url` into `parent_dir`, or reuse an existing checkout there.
///
/// The checkout directory is named after the URL's last path segment.
pub fn ensure_workspace(
    git: &dyn GitOperations,
    url: &str,
    parent_dir: &Path,
) -> Result<Workspace> {
    let name = repository_name(url).ok_or_else(|| Error::Usage {
        message: format!("Cannot derive a repository name from '{}'", url),
        hint: Some("Pass the repository's clone URL, e.g. git@host:group/repo.git".to_string()),
    })?;
    let path = parent_dir.join(&name);

    if path.is_dir() {
        info!("Use existing repository in {}", path.display());
        return Ok(Workspace { name, path });
    }

    fs::create_dir_all(parent_dir)?;
    info!("Clone {} into {}", url, path.display());
    let result = git.clone_repo(url, parent_dir, &name)?;
    if !result.success || !path.is_dir() {
        return Err(Error::CloneFailed {
            url: url.to_string(),
            message: result.output,
        });
    }

    Ok(Workspace { name, path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockGitOperations;
    use tempfile::TempDir;

    #[test]
    fn test_clones_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let git = MockGitOperations::new();

        let workspace =
            ensure_workspace(&git, "git@gitlab.com:acme/api.git", temp_dir.path()).unwrap();

        assert_eq!(workspace.name(), "api.git");
        assert_eq!(workspace.path(), temp_dir.path().join("api.git"));
        assert_eq!(git.calls(), vec!["clone git@gitlab.com:acme/api.git"]);
    }

    #[test]
    fn test_reuses_existing_checkout_without_git() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("api")).unwrap();
        let git = MockGitOperations::new();

        let workspace =
            ensure_workspace(&git, "https://gitlab.com/acme/api", temp_dir.path()).unwrap();

        assert_eq!(workspace.path(), temp_dir.path().join("api"));
        assert!(git.calls().is_empty());
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let parent = temp_dir.path().join("deep/work");
        let git = MockGitOperations::new();

        ensure_workspace(&git, "https://gitlab.com/acme/api.git", &parent).unwrap();
        assert!(parent.join("api.git").is_dir());
    }

    #[test]
    fn test_clone_failure() {
        let temp_dir = TempDir::new().unwrap();
        let git = MockGitOperations::new().fail("clone", "repository not found");

        let result = ensure_workspace(&git, "https://gitlab.com/acme/missing.git", temp_dir.path());
        match result {
            Err(err @ Error::CloneFailed { .. }) => {
                let message = err.to_string();
                assert!(message.contains("Cloning failed"));
                assert!(message.contains("repository not found"));
            }
            other => panic!("expected CloneFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_url_without_name_is_usage_error() {
        let temp_dir = TempDir::new().unwrap();
        let git = MockGitOperations::new();
        let result = ensure_workspace(&git, "", temp_dir.path());
        assert!(matches!(result, Err(Error::Usage { .. })));
        assert!(git.calls().is_empty());
    }
}
