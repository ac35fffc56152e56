//! # Patch and Merge Workflows
//!
//! This module runs a single job against a single repository. There are two
//! kinds of job:
//!
//! 1.  **Patch** ([`PatchJob`]): clone or reuse the checkout, check out and
//!     pull the source branch, create the feature branch, run the patch
//!     mechanism, and if the working tree changed, commit, push and optionally
//!     open a merge request.
//!
//! 2.  **Merge** ([`MergeJob`]): check out and pull both branches, skip if the
//!     source is already contained in the target, otherwise merge and push.
//!
//! Each step either moves on, ends the job with a benign [`JobOutcome`]
//! (nothing changed, nothing to merge, operator declined), or fails with a
//! typed [`Error`](crate::error::Error). Errors are never swallowed here; the
//! batch runner is the only place that turns them into a recorded result.
//!
//! All Git access goes through [`GitOperations`], and the checkout location is
//! passed explicitly to every step.

mod merge;
mod patch;

pub use merge::MergeJob;
pub use patch::{generate_branch_name, read_commit_message, PatchJob, COMMIT_MESSAGE_FILE};

use std::fmt;

use crate::error::Result;
use crate::provider::ProviderResolver;
use crate::repository::{DefaultGitOperations, GitOperations};

/// How a job ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The patch was committed and pushed on `branch`.
    Applied {
        branch: String,
        /// Web URL of the merge request, when one was opened.
        merge_request: Option<String>,
    },
    /// The patch mechanism left the working tree clean.
    NoChanges,
    /// The operator declined to commit at the halt-before-commit prompt.
    Aborted,
    /// The source branch was merged into and pushed as `target`.
    Merged { target: String },
    /// The source branch is already an ancestor of the target.
    NothingToMerge,
    /// Dry run: nothing was executed.
    DryRun { action: String },
}

impl JobOutcome {
    /// Whether the job changed a remote (counts as success in a batch).
    /// Every other outcome counts as skipped.
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Applied { .. } | JobOutcome::Merged { .. })
    }
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobOutcome::Applied {
                branch,
                merge_request: Some(url),
            } => write!(f, "pushed branch {} (merge request: {})", branch, url),
            JobOutcome::Applied { branch, .. } => write!(f, "pushed branch {}", branch),
            JobOutcome::NoChanges => write!(f, "nothing to commit, no changes in repository"),
            JobOutcome::Aborted => write!(f, "aborted before commit"),
            JobOutcome::Merged { target } => write!(f, "merged and pushed {}", target),
            JobOutcome::NothingToMerge => write!(f, "nothing to merge"),
            JobOutcome::DryRun { action } => write!(f, "dry run: {}", action),
        }
    }
}

/// Asks the operator whether to continue, given some context text.
pub trait Confirmation {
    fn confirm(&self, context: &str) -> Result<bool>;
}

/// A [`Confirmation`] with a fixed answer, for unattended runs.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmation for AutoConfirm {
    fn confirm(&self, _context: &str) -> Result<bool> {
        Ok(self.0)
    }
}

/// A merge request to open after a patch branch was pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Namespaced project path, e.g. `acme/api`.
    pub project: String,
    pub source_branch: String,
    pub target_branch: String,
    pub title: String,
    pub description: String,
}

/// Something that can open merge requests on the hosting provider.
pub trait MergeRequestCreator {
    /// Open the merge request and return its web URL.
    fn create_merge_request(&self, request: &MergeRequest) -> Result<String>;
}

/// Runs patch and merge jobs.
pub struct Workflow {
    git: Box<dyn GitOperations>,
    resolver: ProviderResolver,
    merge_requests: Option<Box<dyn MergeRequestCreator>>,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow {
    /// Workflow using the system `git` and the built-in patch providers.
    pub fn new() -> Self {
        Self::with_operations(Box::new(DefaultGitOperations))
    }

    /// Workflow with a custom `GitOperations` implementation.
    pub fn with_operations(git: Box<dyn GitOperations>) -> Self {
        Self {
            git,
            resolver: ProviderResolver::new(),
            merge_requests: None,
        }
    }

    /// Enable merge request creation for patch jobs that ask for it.
    pub fn with_merge_requests(mut self, creator: Box<dyn MergeRequestCreator>) -> Self {
        self.merge_requests = Some(creator);
        self
    }

    pub fn resolver(&self) -> &ProviderResolver {
        &self.resolver
    }
}
