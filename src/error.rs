//! # Error Handling
//!
//! This module defines the centralized error type for `patchbot`. It uses the
//! `thiserror` library to create a single `Error` enum covering every failure a
//! patch or merge job can run into, each with a message that tells the operator
//! which step failed and for which repository or branch.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Variants are grouped by the step that raises
//!   them: usage, workspace setup, patch mechanism, Git operations, and the
//!   remote hosting API.
//!
//! - **`ErrorKind`**: A coarse classification of an `Error`, used when
//!   reporting batch results.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Benign no-op terminations ("no changes", "nothing to merge") are not errors;
//! they are reported through `workflow::JobOutcome`.

use thiserror::Error;

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

/// Main error type for patchbot operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required input is missing or invalid. Raised before any side effect.
    #[error("{message}{}", hint_suffix(hint))]
    Usage {
        message: String,
        hint: Option<String>,
    },

    /// `git clone` did not report success.
    #[error("Cloning failed for {url}: {message}\n  hint: check the repository URL and your access rights")]
    CloneFailed { url: String, message: String },

    /// Checking out the source branch, pulling, or creating the feature branch failed.
    #[error("Could not create branch {branch} from {source_branch}: {message}")]
    BranchCreationFailed {
        branch: String,
        source_branch: String,
        message: String,
    },

    /// The merge source branch could not be checked out or pulled.
    #[error("Source branch {branch} is missing: {message}")]
    SourceBranchMissing { branch: String, message: String },

    /// The merge target branch could not be checked out or pulled.
    #[error("Target branch {branch} is missing: {message}")]
    TargetBranchMissing { branch: String, message: String },

    /// The patch directory does not exist.
    #[error("Patch directory not found: {path}")]
    PatchNotFound { path: String },

    /// No recognized patch mechanism file exists in the patch directory.
    #[error("No patch file found in {path} (supported: {supported})")]
    NoProviderFound { path: String, supported: String },

    /// More than one recognized patch mechanism file exists in the patch directory.
    #[error("Multiple patch files found in {path}: {} - only one patch file per directory is allowed", files.join(", "))]
    AmbiguousProvider { path: String, files: Vec<String> },

    /// The patch mechanism could not be invoked at all (e.g. missing interpreter).
    #[error("Patch script execution failed for {file}: {message}")]
    PatchExecutionFailed { file: String, message: String },

    /// The patch directory has no `commit-message.txt`.
    #[error("Commit message file not found: {path}")]
    CommitMessageMissing { path: String },

    /// `git add` or `git commit` did not report success.
    #[error("Committing changes failed: {message}")]
    CommitFailed { message: String },

    /// `git push` did not report success.
    #[error("Pushing branch {branch} failed: {message}")]
    PushFailed { branch: String, message: String },

    /// `git merge` did not resolve cleanly.
    #[error("Merging {source_branch} into {target} failed: {message}")]
    MergeConflict {
        source_branch: String,
        target: String,
        message: String,
    },

    /// A Git process could not be spawned.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// The discovery file could not be read or written.
    #[error("Discovery file error for {path}: {message}")]
    DiscoveryFile { path: String, message: String },

    /// A call to the hosting provider API failed.
    #[error("Hosting API error for {url}: {message}")]
    Remote { url: String, message: String },

    /// A patch scaffolding operation (create/import/export) failed.
    #[error("Patch scaffolding error: {message}")]
    Scaffold { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// An HTTP transport error, wrapped from `reqwest::Error`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Workspace,
    PatchMechanism,
    GitOperation,
    Remote,
    Io,
}

impl Error {
    /// Build a usage error without a hint.
    pub fn usage(message: impl Into<String>) -> Self {
        Error::Usage {
            message: message.into(),
            hint: None,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Usage { .. } | Error::Glob(_) | Error::UrlParse(_) => ErrorKind::Usage,
            Error::CloneFailed { .. }
            | Error::BranchCreationFailed { .. }
            | Error::SourceBranchMissing { .. }
            | Error::TargetBranchMissing { .. } => ErrorKind::Workspace,
            Error::PatchNotFound { .. }
            | Error::NoProviderFound { .. }
            | Error::AmbiguousProvider { .. }
            | Error::PatchExecutionFailed { .. }
            | Error::CommitMessageMissing { .. }
            | Error::Scaffold { .. } => ErrorKind::PatchMechanism,
            Error::CommitFailed { .. }
            | Error::PushFailed { .. }
            | Error::MergeConflict { .. }
            | Error::GitCommand { .. } => ErrorKind::GitOperation,
            Error::Remote { .. } | Error::Http(_) => ErrorKind::Remote,
            Error::DiscoveryFile { .. } | Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
