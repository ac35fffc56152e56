//! # Batch Patch Command Implementation
//!
//! Applies one patch to every repository of a discovery file:
//!
//! ```bash
//! patchbot batch-patch --patch-name update-readme --filter topic:php
//! ```
//!
//! All repositories share one feature branch name. Each repository starts
//! from `--source-branch`, or from its own default branch when omitted. A
//! failing repository is reported and the run continues; the command exits
//! non-zero when at least one repository failed.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Args;

use patchbot::batch::run_batch;
use patchbot::defaults::{
    default_patch_source_directory, default_working_directory, DEFAULT_DISCOVERY_FILE,
    DEFAULT_GITLAB_URL, DEFAULT_PATCH_NAME,
};
use patchbot::discovery::CloneMethod;
use patchbot::output::{emoji, OutputConfig};
use patchbot::workflow::{generate_branch_name, PatchJob, Workflow};

use super::common::{
    confirmation, finish_batch, is_interactive, load_repositories, merge_request_client,
    print_entry, progress_bar, require_patch,
};

/// Apply a patch to every repository of a discovery file
#[derive(Args, Debug)]
pub struct BatchPatchArgs {
    /// Discovery file listing the repositories
    #[arg(
        short = 'f',
        long,
        value_name = "PATH",
        env = "PATCHBOT_DISCOVERY_FILE",
        default_value = DEFAULT_DISCOVERY_FILE
    )]
    pub file: PathBuf,

    /// Only include matching repositories (path:<glob> or topic:<name>, repeatable)
    #[arg(long, value_name = "KIND:VALUE")]
    pub filter: Vec<String>,

    /// Clone over SSH or HTTPS
    #[arg(long, value_enum, default_value_t = CloneMethod::Ssh)]
    pub clone_method: CloneMethod,

    /// Name of the patch directory to apply
    #[arg(short = 'p', long, value_name = "NAME", default_value = DEFAULT_PATCH_NAME)]
    pub patch_name: String,

    /// Directory containing the patch directories
    #[arg(
        short = 's',
        long,
        value_name = "PATH",
        env = "PATCHBOT_PATCH_SOURCE_DIRECTORY"
    )]
    pub patch_source_directory: Option<PathBuf>,

    /// Parent directory for repository checkouts
    #[arg(short = 'd', long, value_name = "PATH", env = "PATCHBOT_WORKING_DIRECTORY")]
    pub working_directory: Option<PathBuf>,

    /// Branch to create the feature branch from (default: each repository's default branch)
    #[arg(long, value_name = "BRANCH")]
    pub source_branch: Option<String>,

    /// Name of the feature branch (generated once for the whole batch when omitted)
    #[arg(long, value_name = "BRANCH")]
    pub branch_name: Option<String>,

    /// Ask for confirmation before each commit
    #[arg(long)]
    pub halt_before_commit: bool,

    /// Show what would be done without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Open a merge request in each patched repository
    #[arg(long)]
    pub create_mr: bool,

    /// GitLab instance used for merge requests
    #[arg(long, value_name = "URL", env = "PATCHBOT_GITLAB_URL", default_value = DEFAULT_GITLAB_URL)]
    pub gitlab_url: String,

    /// GitLab access token used for merge requests
    #[arg(long, value_name = "TOKEN", env = "PATCHBOT_GITLAB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Execute the batch-patch command
pub fn execute(args: BatchPatchArgs, output: &OutputConfig) -> Result<()> {
    let patch_source_directory = args
        .patch_source_directory
        .unwrap_or_else(default_patch_source_directory);
    require_patch(&patch_source_directory, &args.patch_name)?;
    let repositories = load_repositories(&args.file, &args.filter)?;
    let halt = args.halt_before_commit && !args.dry_run;
    let interactive = is_interactive();
    let confirmation = confirmation(halt, interactive);
    let client = merge_request_client(args.create_mr, &args.gitlab_url, args.token.as_deref())?;

    if repositories.is_empty() {
        println!("No repositories match in {}", args.file.display());
        return Ok(());
    }

    let working_directory = args
        .working_directory
        .unwrap_or_else(default_working_directory);
    let branch_name = args
        .branch_name
        .unwrap_or_else(|| generate_branch_name(Local::now().date_naive()));

    if args.dry_run {
        println!(
            "{} DRY RUN MODE - No changes will be made",
            emoji(output, "🔎", "[DRY RUN]")
        );
    }
    println!(
        "{} Applying {} to {} repositories on branch {}",
        emoji(output, "🚀", "[BATCH]"),
        args.patch_name,
        repositories.len(),
        branch_name
    );

    let mut workflow = Workflow::new();
    if let Some(client) = client {
        workflow = workflow.with_merge_requests(Box::new(client));
    }

    let bar = progress_bar(repositories.len(), halt && interactive);
    let result = run_batch(
        &repositories,
        |repository| {
            bar.set_message(repository.path_with_namespace.clone());
            let job = PatchJob {
                repository_url: repository.clone_url(args.clone_method).to_string(),
                working_directory: working_directory.clone(),
                patch_source_directory: patch_source_directory.clone(),
                patch_name: args.patch_name.clone(),
                source_branch: args
                    .source_branch
                    .clone()
                    .unwrap_or_else(|| repository.default_branch.clone()),
                branch_name: branch_name.clone(),
                halt_before_commit: halt,
                dry_run: args.dry_run,
                merge_request_project: args
                    .create_mr
                    .then(|| repository.path_with_namespace.clone()),
            };
            workflow.run_patch(&job, confirmation.as_ref())
        },
        |entry| print_entry(&bar, output, entry),
    );

    finish_batch(&bar, output, &result)
}
