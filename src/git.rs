//! Thin wrappers around the system `git` command.
//!
//! Every function runs one `git` invocation in an explicit directory and
//! returns a [`GitOutput`] carrying the success flag and the combined output.
//! A non-zero exit status is not an error at this level: the workflow decides
//! which typed failure a failed step maps to. Only a failure to spawn `git`
//! at all is reported as [`Error::GitCommand`].
//!
//! Using the system git means authentication is handled the same way as on
//! the operator's shell (SSH agent, credential helpers, tokens in
//! `~/.gitconfig`).

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Result of a single git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Whether git exited with status 0.
    pub success: bool,
    /// Stdout followed by stderr.
    pub output: String,
}

impl GitOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// Run `git <args>` inside `dir`.
pub fn run(dir: &Path, args: &[&str]) -> Result<GitOutput> {
    debug!("git {} (in {})", args.join(" "), dir.display());

    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            stderr: e.to_string(),
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        debug!("git {} exited with {}", args.join(" "), output.status);
    }

    Ok(GitOutput {
        success: output.status.success(),
        output: combined.trim_end().to_string(),
    })
}

/// `git clone <url> <name>` inside `parent`.
pub fn clone(url: &str, parent: &Path, name: &str) -> Result<GitOutput> {
    run(parent, &["clone", url, name])
}

pub fn checkout(repo: &Path, branch: &str) -> Result<GitOutput> {
    run(repo, &["checkout", branch])
}

pub fn pull(repo: &Path) -> Result<GitOutput> {
    run(repo, &["pull"])
}

/// `git checkout -b <branch>`
pub fn create_branch(repo: &Path, branch: &str) -> Result<GitOutput> {
    run(repo, &["checkout", "-b", branch])
}

/// Machine-readable status; empty output means a clean working tree.
pub fn status_porcelain(repo: &Path) -> Result<GitOutput> {
    run(repo, &["status", "--porcelain"])
}

/// Human-readable short status, shown to the operator before committing.
pub fn status_short(repo: &Path) -> Result<GitOutput> {
    run(repo, &["status", "--short"])
}

pub fn add_all(repo: &Path) -> Result<GitOutput> {
    run(repo, &["add", "-A"])
}

pub fn commit(repo: &Path, message: &str) -> Result<GitOutput> {
    run(repo, &["commit", "-m", message])
}

/// `git push origin <branch>`
pub fn push(repo: &Path, branch: &str) -> Result<GitOutput> {
    run(repo, &["push", "origin", branch])
}

/// `git merge-base --is-ancestor <ancestor> <descendant>`; success means it is one.
pub fn is_ancestor(repo: &Path, ancestor: &str, descendant: &str) -> Result<GitOutput> {
    run(repo, &["merge-base", "--is-ancestor", ancestor, descendant])
}

/// Merge `branch` into the current branch without opening an editor.
pub fn merge(repo: &Path, branch: &str) -> Result<GitOutput> {
    run(repo, &["merge", "--no-edit", branch])
}

pub fn merge_abort(repo: &Path) -> Result<GitOutput> {
    run(repo, &["merge", "--abort"])
}

/// Apply a unified diff to the working tree.
pub fn apply(repo: &Path, diff_file: &Path) -> Result<GitOutput> {
    let diff = diff_file.to_string_lossy();
    run(repo, &["apply", diff.as_ref()])
}
