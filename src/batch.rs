//! # Batch Runner
//!
//! Runs one job per repository, in order, and tallies the results. A failing
//! repository is recorded and the run moves on; nothing a single job does can
//! stop the batch.
//!
//! The runner does not know what a job is. The batch commands
//! pass a closure that builds a [`PatchJob`](crate::workflow::PatchJob) or
//! [`MergeJob`](crate::workflow::MergeJob) for the repository and runs it.

use std::fmt;

use log::{debug, info};

use crate::discovery::RepositoryRecord;
use crate::error::{ErrorKind, Result};
use crate::workflow::JobOutcome;

/// Result class of one repository in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Success,
    Skipped,
    Failed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Success => write!(f, "success"),
            BatchStatus::Skipped => write!(f, "skipped"),
            BatchStatus::Failed => write!(f, "failed"),
        }
    }
}

/// What happened to one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// Namespaced path of the repository.
    pub repository: String,
    pub status: BatchStatus,
    /// Outcome description or error message.
    pub detail: String,
    /// Set for failed entries.
    pub error_kind: Option<ErrorKind>,
}

/// Tallies of a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub entries: Vec<BatchEntry>,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == BatchStatus::Failed)
    }

    fn record(&mut self, entry: BatchEntry) {
        match entry.status {
            BatchStatus::Success => self.success += 1,
            BatchStatus::Skipped => self.skipped += 1,
            BatchStatus::Failed => self.failed += 1,
        }
        self.entries.push(entry);
    }
}

/// Classify a job result into a batch entry.
pub fn entry_for(repository: &str, result: Result<JobOutcome>) -> BatchEntry {
    match result {
        Ok(outcome) => BatchEntry {
            repository: repository.to_string(),
            status: if outcome.is_success() {
                BatchStatus::Success
            } else {
                BatchStatus::Skipped
            },
            detail: outcome.to_string(),
            error_kind: None,
        },
        Err(e) => BatchEntry {
            repository: repository.to_string(),
            status: BatchStatus::Failed,
            detail: e.to_string(),
            error_kind: Some(e.kind()),
        },
    }
}

/// Run `job` for every repository and collect the results.
///
/// `report` is called after each repository, in order, with its entry.
pub fn run_batch<J, R>(repositories: &[RepositoryRecord], mut job: J, mut report: R) -> BatchResult
where
    J: FnMut(&RepositoryRecord) -> Result<JobOutcome>,
    R: FnMut(&BatchEntry),
{
    let mut result = BatchResult::default();
    for (index, repository) in repositories.iter().enumerate() {
        info!(
            "[{}/{}] {}",
            index + 1,
            repositories.len(),
            repository.path_with_namespace
        );
        let entry = entry_for(&repository.path_with_namespace, job(repository));
        debug!("{}: {} ({})", entry.repository, entry.status, entry.detail);
        report(&entry);
        result.record(entry);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn record(path: &str) -> RepositoryRecord {
        RepositoryRecord {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path_with_namespace: path.to_string(),
            url: format!("https://gitlab.com/{}", path),
            clone_url_ssh: format!("git@gitlab.com:{}.git", path),
            clone_url_http: format!("https://gitlab.com/{}.git", path),
            default_branch: "main".to_string(),
            topics: vec![],
        }
    }

    #[test]
    fn test_failure_is_isolated() {
        let repos = vec![record("acme/a"), record("acme/b"), record("acme/c")];
        let mut visited = Vec::new();

        let result = run_batch(
            &repos,
            |repo| {
                visited.push(repo.path_with_namespace.clone());
                if repo.name == "b" {
                    Err(Error::CloneFailed {
                        url: repo.clone_url_ssh.clone(),
                        message: "repository not found".to_string(),
                    })
                } else {
                    Ok(JobOutcome::Applied {
                        branch: "feature".to_string(),
                        merge_request: None,
                    })
                }
            },
            |_| {},
        );

        assert_eq!(visited, vec!["acme/a", "acme/b", "acme/c"]);
        assert_eq!(result.success, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.skipped, 0);
        assert!(result.has_failures());

        let failures: Vec<_> = result.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].repository, "acme/b");
        assert!(failures[0].detail.contains("Cloning failed"));
        assert_eq!(failures[0].error_kind, Some(ErrorKind::Workspace));
    }

    #[test]
    fn test_tallies_add_up() {
        let repos = vec![
            record("acme/a"),
            record("acme/b"),
            record("acme/c"),
            record("acme/d"),
        ];
        let outcomes = [
            JobOutcome::NoChanges,
            JobOutcome::Merged {
                target: "main".to_string(),
            },
            JobOutcome::NothingToMerge,
            JobOutcome::DryRun {
                action: "merge".to_string(),
            },
        ];
        let mut next = outcomes.iter();

        let result = run_batch(&repos, |_| Ok(next.next().unwrap().clone()), |_| {});

        assert_eq!(result.success, 1);
        assert_eq!(result.skipped, 3);
        assert_eq!(result.failed, 0);
        assert_eq!(
            result.success + result.skipped + result.failed,
            result.total()
        );
        assert!(!result.has_failures());
    }

    #[test]
    fn test_report_called_in_order() {
        let repos = vec![record("acme/a"), record("acme/b")];
        let mut reported = Vec::new();

        run_batch(
            &repos,
            |_| Ok(JobOutcome::NoChanges),
            |entry| reported.push((entry.repository.clone(), entry.status)),
        );

        assert_eq!(
            reported,
            vec![
                ("acme/a".to_string(), BatchStatus::Skipped),
                ("acme/b".to_string(), BatchStatus::Skipped),
            ]
        );
    }

    #[test]
    fn test_empty_batch() {
        let result = run_batch(&[], |_| Ok(JobOutcome::NoChanges), |_| {});
        assert_eq!(result, BatchResult::default());
        assert_eq!(result.total(), 0);
    }
}
