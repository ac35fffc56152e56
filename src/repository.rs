//! # Git Operations Seam
//!
//! The workflow never calls `git` directly. It goes through the
//! [`GitOperations`] trait so that every step can be exercised in tests with
//! a mock that records calls and returns scripted results, without touching a
//! real repository or the network.
//!
//! [`DefaultGitOperations`] is the production implementation; it forwards to
//! the functions in [`crate::git`], which run the system `git` binary.
//!
//! Every method returns `Ok(GitOutput)` whenever git could be started, with
//! `success` reflecting the exit status. The caller maps an unsuccessful
//! output to the typed error for its step.

use std::path::Path;

use crate::error::Result;
use crate::git::{self, GitOutput};

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Clone `url` into `parent/name`.
    fn clone_repo(&self, url: &str, parent: &Path, name: &str) -> Result<GitOutput>;

    fn checkout(&self, repo: &Path, branch: &str) -> Result<GitOutput>;

    fn pull(&self, repo: &Path) -> Result<GitOutput>;

    /// Create `branch` from the current HEAD and switch to it.
    fn create_branch(&self, repo: &Path, branch: &str) -> Result<GitOutput>;

    /// Porcelain status; an empty `output` means nothing changed.
    fn status(&self, repo: &Path) -> Result<GitOutput>;

    /// Short human-readable status summary.
    fn status_summary(&self, repo: &Path) -> Result<GitOutput>;

    /// Stage every change, including deletions and untracked files.
    fn add_all(&self, repo: &Path) -> Result<GitOutput>;

    fn commit(&self, repo: &Path, message: &str) -> Result<GitOutput>;

    /// Push `branch` to `origin`.
    fn push(&self, repo: &Path, branch: &str) -> Result<GitOutput>;

    /// Succeeds when `ancestor` is reachable from `descendant`.
    fn is_ancestor(&self, repo: &Path, ancestor: &str, descendant: &str) -> Result<GitOutput>;

    /// Merge `branch` into the checked out branch.
    fn merge(&self, repo: &Path, branch: &str) -> Result<GitOutput>;

    fn merge_abort(&self, repo: &Path) -> Result<GitOutput>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_repo(&self, url: &str, parent: &Path, name: &str) -> Result<GitOutput> {
        git::clone(url, parent, name)
    }

    fn checkout(&self, repo: &Path, branch: &str) -> Result<GitOutput> {
        git::checkout(repo, branch)
    }

    fn pull(&self, repo: &Path) -> Result<GitOutput> {
        git::pull(repo)
    }

    fn create_branch(&self, repo: &Path, branch: &str) -> Result<GitOutput> {
        git::create_branch(repo, branch)
    }

    fn status(&self, repo: &Path) -> Result<GitOutput> {
        git::status_porcelain(repo)
    }

    fn status_summary(&self, repo: &Path) -> Result<GitOutput> {
        git::status_short(repo)
    }

    fn add_all(&self, repo: &Path) -> Result<GitOutput> {
        git::add_all(repo)
    }

    fn commit(&self, repo: &Path, message: &str) -> Result<GitOutput> {
        git::commit(repo, message)
    }

    fn push(&self, repo: &Path, branch: &str) -> Result<GitOutput> {
        git::push(repo, branch)
    }

    fn is_ancestor(&self, repo: &Path, ancestor: &str, descendant: &str) -> Result<GitOutput> {
        git::is_ancestor(repo, ancestor, descendant)
    }

    fn merge(&self, repo: &Path, branch: &str) -> Result<GitOutput> {
        git::merge(repo, branch)
    }

    fn merge_abort(&self, repo: &Path) -> Result<GitOutput> {
        git::merge_abort(repo)
    }
}
