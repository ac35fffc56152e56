//! The merge job.

use std::path::PathBuf;

use log::{info, warn};

use super::{JobOutcome, Workflow};
use crate::error::{Error, Result};
use crate::workspace::ensure_workspace;

/// Parameters of one merge run against one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeJob {
    pub repository_url: String,
    /// Parent directory of the repository checkouts.
    pub working_directory: PathBuf,
    /// Branch to merge from.
    pub source: String,
    /// Branch to merge into and push.
    pub target: String,
    pub dry_run: bool,
}

impl MergeJob {
    pub fn new(
        repository_url: impl Into<String>,
        working_directory: impl Into<PathBuf>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            repository_url: repository_url.into(),
            working_directory: working_directory.into(),
            source: source.into(),
            target: target.into(),
            dry_run: false,
        }
    }
}

impl Workflow {
    /// Merge `job.source` into `job.target` and push the target.
    ///
    /// Both branches are pulled first. When the source is already an ancestor
    /// of the target nothing is merged or pushed. A failed merge is aborted so
    /// the checkout stays usable for the next run.
    pub fn run_merge(&self, job: &MergeJob) -> Result<JobOutcome> {
        if job.dry_run {
            return Ok(JobOutcome::DryRun {
                action: format!(
                    "merge {} into {} in {}",
                    job.source, job.target, job.repository_url
                ),
            });
        }

        let workspace =
            ensure_workspace(self.git.as_ref(), &job.repository_url, &job.working_directory)?;
        let path = workspace.path();

        info!("Update source branch {}", job.source);
        let checkout = self.git.checkout(path, &job.source)?;
        let checkout = if checkout.success { self.git.pull(path)? } else { checkout };
        if !checkout.success {
            return Err(Error::SourceBranchMissing {
                branch: job.source.clone(),
                message: checkout.output,
            });
        }

        info!("Update target branch {}", job.target);
        let checkout = self.git.checkout(path, &job.target)?;
        let checkout = if checkout.success { self.git.pull(path)? } else { checkout };
        if !checkout.success {
            return Err(Error::TargetBranchMissing {
                branch: job.target.clone(),
                message: checkout.output,
            });
        }

        if self.git.is_ancestor(path, &job.source, &job.target)?.success {
            info!("{} is already contained in {}", job.source, job.target);
            return Ok(JobOutcome::NothingToMerge);
        }

        info!("Merge {} into {}", job.source, job.target);
        let merged = self.git.merge(path, &job.source)?;
        if !merged.success {
            let aborted = self.git.merge_abort(path)?;
            if !aborted.success {
                warn!(
                    "Could not abort merge in {}: {}",
                    path.display(),
                    aborted.output
                );
            }
            return Err(Error::MergeConflict {
                source_branch: job.source.clone(),
                target: job.target.clone(),
                message: merged.output,
            });
        }

        info!("Push branch {}", job.target);
        let pushed = self.git.push(path, &job.target)?;
        if !pushed.success {
            return Err(Error::PushFailed {
                branch: job.target.clone(),
                message: pushed.output,
            });
        }

        Ok(JobOutcome::Merged {
            target: job.target.clone(),
        })
    }
}
