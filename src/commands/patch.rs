//! # Patch Command Implementation
//!
//! Applies one patch to one repository:
//!
//! ```bash
//! patchbot patch --repository-url git@gitlab.com:acme/api.git --patch-name update-readme
//! ```
//!
//! The repository is cloned into the working directory (or reused), a
//! feature branch is created from the source branch, the patch runs inside
//! the checkout and any changes are committed and pushed. With `--create-mr`
//! a merge request is opened against the source branch.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Args;

use patchbot::defaults::{
    default_patch_source_directory, default_working_directory, DEFAULT_GITLAB_URL,
    DEFAULT_PATCH_NAME, DEFAULT_SOURCE_BRANCH,
};
use patchbot::output::{emoji, OutputConfig};
use patchbot::path::project_path;
use patchbot::suggestions;
use patchbot::workflow::{generate_branch_name, PatchJob, Workflow};

use super::common::{confirmation, is_interactive, merge_request_client, require_patch};

/// Apply a patch to one repository
#[derive(Args, Debug)]
pub struct PatchArgs {
    /// Clone URL of the repository to patch
    #[arg(long, value_name = "URL")]
    pub repository_url: Option<String>,

    /// Parent directory for repository checkouts
    #[arg(short = 'd', long, value_name = "PATH", env = "PATCHBOT_WORKING_DIRECTORY")]
    pub working_directory: Option<PathBuf>,

    /// Directory containing the patch directories
    #[arg(
        short = 's',
        long,
        value_name = "PATH",
        env = "PATCHBOT_PATCH_SOURCE_DIRECTORY"
    )]
    pub patch_source_directory: Option<PathBuf>,

    /// Name of the patch directory to apply
    #[arg(short = 'p', long, value_name = "NAME", default_value = DEFAULT_PATCH_NAME)]
    pub patch_name: String,

    /// Branch to create the feature branch from
    #[arg(long, value_name = "BRANCH", default_value = DEFAULT_SOURCE_BRANCH)]
    pub source_branch: String,

    /// Name of the feature branch (generated when omitted)
    #[arg(long, value_name = "BRANCH")]
    pub branch_name: Option<String>,

    /// Ask for confirmation before committing
    #[arg(long)]
    pub halt_before_commit: bool,

    /// Show what would be done without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Open a merge request after pushing
    #[arg(long)]
    pub create_mr: bool,

    /// GitLab instance used for merge requests
    #[arg(long, value_name = "URL", env = "PATCHBOT_GITLAB_URL", default_value = DEFAULT_GITLAB_URL)]
    pub gitlab_url: String,

    /// GitLab access token used for merge requests
    #[arg(long, value_name = "TOKEN", env = "PATCHBOT_GITLAB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Show detailed progress information
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the patch command
pub fn execute(args: PatchArgs, output: &OutputConfig) -> Result<()> {
    let repository_url = args
        .repository_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(suggestions::missing_repository_url)?;
    let working_directory = args
        .working_directory
        .unwrap_or_else(default_working_directory);
    let patch_source_directory = args
        .patch_source_directory
        .unwrap_or_else(default_patch_source_directory);
    require_patch(&patch_source_directory, &args.patch_name)?;

    let merge_request_project = if args.create_mr {
        Some(
            project_path(&repository_url)
                .ok_or_else(|| suggestions::merge_request_project_unknown(&repository_url))?,
        )
    } else {
        None
    };
    let client = merge_request_client(args.create_mr, &args.gitlab_url, args.token.as_deref())?;
    let confirmation = confirmation(args.halt_before_commit && !args.dry_run, is_interactive());

    let job = PatchJob {
        repository_url,
        working_directory,
        patch_source_directory,
        patch_name: args.patch_name,
        source_branch: args.source_branch,
        branch_name: args
            .branch_name
            .unwrap_or_else(|| generate_branch_name(Local::now().date_naive())),
        halt_before_commit: args.halt_before_commit,
        dry_run: args.dry_run,
        merge_request_project,
    };

    if args.dry_run {
        println!(
            "{} DRY RUN MODE - No changes will be made",
            emoji(output, "🔎", "[DRY RUN]")
        );
    }
    if args.verbose {
        println!("{} Repository: {}", emoji(output, "📦", "[REPO]"), job.repository_url);
        println!("   Patch: {}", job.patch_directory().display());
        println!("   Checkout in: {}", job.working_directory.display());
        println!("   Branch: {} (from {})", job.branch_name, job.source_branch);
    }

    let mut workflow = Workflow::new();
    if let Some(client) = client {
        workflow = workflow.with_merge_requests(Box::new(client));
    }

    let outcome = workflow.run_patch(&job, confirmation.as_ref())?;
    let marker = if outcome.is_success() {
        emoji(output, "✅", "[OK]")
    } else {
        emoji(output, "⏭️", "[SKIP]")
    };
    println!("{} {}: {}", marker, job.repository_url, outcome);
    Ok(())
}
