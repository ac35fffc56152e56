//! The patch job.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use uuid::Uuid;

use super::{Confirmation, JobOutcome, MergeRequest, Workflow};
use crate::defaults::DEFAULT_SOURCE_BRANCH;
use crate::error::{Error, Result};
use crate::workspace::{ensure_workspace, Workspace};

/// File in the patch directory holding the commit message.
pub const COMMIT_MESSAGE_FILE: &str = "commit-message.txt";

/// Parameters of one patch run against one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchJob {
    pub repository_url: String,
    /// Parent directory of the repository checkouts.
    pub working_directory: PathBuf,
    /// Directory containing the patch directories.
    pub patch_source_directory: PathBuf,
    pub patch_name: String,
    /// Branch the feature branch starts from.
    pub source_branch: String,
    /// Name of the feature branch to create and push.
    pub branch_name: String,
    /// Ask for confirmation before committing.
    pub halt_before_commit: bool,
    pub dry_run: bool,
    /// Namespaced project path to open a merge request in after pushing.
    pub merge_request_project: Option<String>,
}

impl PatchJob {
    /// Job with the default source branch and a freshly generated branch name.
    pub fn new(
        repository_url: impl Into<String>,
        working_directory: impl Into<PathBuf>,
        patch_source_directory: impl Into<PathBuf>,
        patch_name: impl Into<String>,
    ) -> Self {
        Self {
            repository_url: repository_url.into(),
            working_directory: working_directory.into(),
            patch_source_directory: patch_source_directory.into(),
            patch_name: patch_name.into(),
            source_branch: DEFAULT_SOURCE_BRANCH.to_string(),
            branch_name: generate_branch_name(Local::now().date_naive()),
            halt_before_commit: false,
            dry_run: false,
            merge_request_project: None,
        }
    }

    pub fn patch_directory(&self) -> PathBuf {
        self.patch_source_directory.join(&self.patch_name)
    }
}

/// Branch name of the form `YYYYMMDD_patchbot_<13 hex digits>`.
pub fn generate_branch_name(date: NaiveDate) -> String {
    let unique = Uuid::new_v4().simple().to_string();
    format!("{}_patchbot_{}", date.format("%Y%m%d"), &unique[..13])
}

/// Read the commit message of a patch directory.
pub fn read_commit_message(patch_dir: &Path) -> Result<String> {
    let path = patch_dir.join(COMMIT_MESSAGE_FILE);
    if !path.is_file() {
        return Err(Error::CommitMessageMissing {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(&path)?.trim_end().to_string())
}

impl Workflow {
    /// Apply a patch to one repository.
    ///
    /// The patch directory is validated before anything touches the
    /// repository, so a broken patch never leaves a half-prepared checkout.
    pub fn run_patch(&self, job: &PatchJob, confirmation: &dyn Confirmation) -> Result<JobOutcome> {
        let patch_dir = job.patch_directory();
        let provider = self.resolver.resolve(&patch_dir)?;
        let message = read_commit_message(&patch_dir)?;

        if job.dry_run {
            return Ok(JobOutcome::DryRun {
                action: format!(
                    "apply {} ({}) to {} on branch {} from {}",
                    job.patch_name,
                    provider.file_name(),
                    job.repository_url,
                    job.branch_name,
                    job.source_branch
                ),
            });
        }

        let workspace =
            ensure_workspace(self.git.as_ref(), &job.repository_url, &job.working_directory)?;
        self.create_feature_branch(&workspace, &job.source_branch, &job.branch_name)?;

        info!("Run {} in {}", provider.file_name(), workspace.path().display());
        let output = provider.execute(&patch_dir, workspace.path())?;
        if !output.trim().is_empty() {
            debug!("Patch output:\n{}", output.trim_end());
        }

        let status = self.git.status(workspace.path())?;
        if !status.success {
            return Err(Error::GitCommand {
                command: "git status --porcelain".to_string(),
                stderr: status.output,
            });
        }
        if status.output.trim().is_empty() {
            info!("Nothing to commit in {}", workspace.name());
            return Ok(JobOutcome::NoChanges);
        }

        if job.halt_before_commit {
            let summary = self.git.status_summary(workspace.path())?;
            let context = format!(
                "Working directory: {}\n{}",
                workspace.path().display(),
                summary.output
            );
            if !confirmation.confirm(&context)? {
                info!("Commit declined for {}", workspace.name());
                return Ok(JobOutcome::Aborted);
            }
        }

        info!("Commit changes to {}", job.branch_name);
        let added = self.git.add_all(workspace.path())?;
        if !added.success {
            return Err(Error::CommitFailed {
                message: added.output,
            });
        }
        let committed = self.git.commit(workspace.path(), &message)?;
        if !committed.success {
            return Err(Error::CommitFailed {
                message: committed.output,
            });
        }

        info!("Push branch {}", job.branch_name);
        let pushed = self.git.push(workspace.path(), &job.branch_name)?;
        if !pushed.success {
            return Err(Error::PushFailed {
                branch: job.branch_name.clone(),
                message: pushed.output,
            });
        }

        let merge_request = self.open_merge_request(job, &message);
        Ok(JobOutcome::Applied {
            branch: job.branch_name.clone(),
            merge_request,
        })
    }

    fn create_feature_branch(&self, workspace: &Workspace, source: &str, branch: &str) -> Result<()> {
        info!("Create branch {} from {}", branch, source);
        let path = workspace.path();
        let failed = |message: String| Error::BranchCreationFailed {
            branch: branch.to_string(),
            source_branch: source.to_string(),
            message,
        };

        let checkout = self.git.checkout(path, source)?;
        if !checkout.success {
            return Err(failed(checkout.output));
        }
        let pull = self.git.pull(path)?;
        if !pull.success {
            return Err(failed(pull.output));
        }
        let created = self.git.create_branch(path, branch)?;
        if !created.success {
            return Err(failed(created.output));
        }
        Ok(())
    }

    /// A failed merge request never fails the job: the branch is already pushed.
    fn open_merge_request(&self, job: &PatchJob, message: &str) -> Option<String> {
        let project = job.merge_request_project.as_ref()?;
        let Some(creator) = self.merge_requests.as_ref() else {
            warn!("Merge request requested for {} but no hosting client is configured", project);
            return None;
        };

        let (title, description) = match message.split_once('\n') {
            Some((title, rest)) => (title.trim(), rest.trim()),
            None => (message.trim(), ""),
        };
        let request = MergeRequest {
            project: project.clone(),
            source_branch: job.branch_name.clone(),
            target_branch: job.source_branch.clone(),
            title: title.to_string(),
            description: description.to_string(),
        };

        match creator.create_merge_request(&request) {
            Ok(url) => {
                info!("Opened merge request {}", url);
                Some(url)
            }
            Err(e) => {
                warn!("Could not open merge request for {}: {}", project, e);
                None
            }
        }
    }
}
