//! # Patchbot Library
//!
//! This library applies a scripted change ("patch") to one or many Git
//! repositories: clone, branch, run the patch, commit, push, and optionally
//! open a merge request. It also merges branches across repositories and
//! discovers repositories from a GitLab namespace. It is designed to be used
//! by the `patchbot` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use patchbot::filter::{apply_filters, parse_filters};
//! use patchbot::discovery::RepositoryRecord;
//!
//! let repositories = vec![RepositoryRecord {
//!     name: "api".to_string(),
//!     path_with_namespace: "acme/api".to_string(),
//!     url: "https://gitlab.com/acme/api".to_string(),
//!     clone_url_ssh: "git@gitlab.com:acme/api.git".to_string(),
//!     clone_url_http: "https://gitlab.com/acme/api.git".to_string(),
//!     default_branch: "main".to_string(),
//!     topics: vec!["php".to_string()],
//! }];
//!
//! let filters = parse_filters(&["path:acme/*", "topic:php"]).unwrap();
//! assert_eq!(apply_filters(repositories, &filters).len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Patches (`provider`, `scaffold`)**: A patch is a directory holding one
//!   mechanism file (`patch.php`, `patch.sh`, `patch.diff` or `patch.py`) and a
//!   `commit-message.txt`. The resolver picks the provider that runs it.
//! - **Workspaces (`workspace`)**: Local checkouts inside a working directory,
//!   cloned on first use and reused afterwards.
//! - **Git (`git`, `repository`)**: Thin wrappers around the system `git`,
//!   behind the `GitOperations` trait so the workflow can be tested with mocks.
//! - **Workflows (`workflow`)**: The patch and merge jobs for one repository,
//!   each ending in a `JobOutcome` or a typed `Error`.
//! - **Batches (`discovery`, `filter`, `batch`)**: Repository lists loaded
//!   from a discovery file, narrowed by `path:`/`topic:` filters and run one
//!   job per repository with failures isolated.
//! - **Hosting (`gitlab`)**: GitLab API client for discovery and merge requests.
//!
//! ## Execution Flow
//!
//! A patch job runs these steps against one repository:
//!
//! 1.  **Resolve**: Validate the patch directory and read the commit message.
//! 2.  **Workspace**: Clone the repository or reuse the existing checkout.
//! 3.  **Branch**: Check out and pull the source branch, create the feature branch.
//! 4.  **Patch**: Run the mechanism inside the checkout.
//! 5.  **Detect**: Stop with "no changes" when the working tree is clean.
//! 6.  **Commit & Push**: Stage everything, commit, push the feature branch.
//! 7.  **Merge Request**: Optionally open a merge request on GitLab.

pub mod batch;
pub mod defaults;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod git;
pub mod gitlab;
pub mod output;
pub mod path;
pub mod provider;
pub mod repository;
pub mod scaffold;
pub mod suggestions;
pub mod workflow;
pub mod workspace;

#[cfg(test)]
mod path_proptest;
