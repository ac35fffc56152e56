//! Helpers shared by the patch and batch commands.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;

use patchbot::batch::{BatchEntry, BatchResult};
use patchbot::discovery::{DiscoveryFile, RepositoryRecord};
use patchbot::filter::{apply_filters, parse_filters};
use patchbot::gitlab::GitLabClient;
use patchbot::output::{batch_summary, emoji, status_marker, OutputConfig};
use patchbot::scaffold::list_patches;
use patchbot::suggestions;
use patchbot::workflow::{AutoConfirm, Confirmation};

use super::confirm::TerminalConfirmation;

/// Fail with a suggestion when `source_dir/name` is not a directory.
pub fn require_patch(source_dir: &Path, name: &str) -> Result<PathBuf> {
    let dir = source_dir.join(name);
    if !dir.is_dir() {
        let available = list_patches(source_dir)?;
        return Err(suggestions::patch_not_found(name, source_dir, &available));
    }
    Ok(dir)
}

/// Load a discovery file and keep the repositories matching `filters`.
pub fn load_repositories(file: &Path, filters: &[String]) -> Result<Vec<RepositoryRecord>> {
    if !file.is_file() {
        return Err(suggestions::discovery_file_not_found(file));
    }
    let discovery = DiscoveryFile::load(file)?;
    let filters = parse_filters(filters)?;
    Ok(apply_filters(discovery.repositories, &filters))
}

/// GitLab client for `--create-mr`, or `None` when merge requests are off.
pub fn merge_request_client(
    create_mr: bool,
    gitlab_url: &str,
    token: Option<&str>,
) -> Result<Option<GitLabClient>> {
    if !create_mr {
        return Ok(None);
    }
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(suggestions::missing_token)?;
    Ok(Some(GitLabClient::new(gitlab_url, token)?))
}

/// Whether prompts can be answered.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && console::Term::stderr().is_term()
}

/// Confirmation used at the halt-before-commit prompt.
///
/// Without a terminal nobody can answer, so every commit goes ahead and a
/// warning says so.
pub fn confirmation(halt_before_commit: bool, interactive: bool) -> Box<dyn Confirmation> {
    if !halt_before_commit {
        return Box::new(AutoConfirm(true));
    }
    if !interactive {
        warn!("--halt-before-commit needs an interactive terminal; committing without confirmation");
        return Box::new(AutoConfirm(true));
    }
    Box::new(TerminalConfirmation)
}

/// Progress bar over `len` repositories. Hidden while prompts may appear.
pub fn progress_bar(len: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{pos}/{len}] {wide_msg}") {
        bar.set_style(style);
    }
    bar
}

/// Print one batch entry above the progress bar.
pub fn print_entry(bar: &ProgressBar, output: &OutputConfig, entry: &BatchEntry) {
    bar.inc(1);
    bar.suspend(|| {
        println!(
            "{} {}: {}",
            status_marker(output, entry.status),
            entry.repository,
            entry.detail
        )
    });
}

/// Print the tally and fail when any repository failed.
pub fn finish_batch(bar: &ProgressBar, output: &OutputConfig, result: &BatchResult) -> Result<()> {
    bar.finish_and_clear();
    println!();
    println!("{} {}", emoji(output, "📊", "[SUMMARY]"), batch_summary(result));
    if result.has_failures() {
        anyhow::bail!(
            "{} of {} repositories failed",
            result.failed,
            result.total()
        );
    }
    Ok(())
}
