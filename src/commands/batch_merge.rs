//! Batch merge command implementation
//!
//! Merges `--source` into `--target` (or each repository's default branch)
//! in every repository of a discovery file. Repositories where the source is
//! missing or already merged are reported and the run continues.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use patchbot::batch::run_batch;
use patchbot::defaults::{default_working_directory, DEFAULT_DISCOVERY_FILE};
use patchbot::discovery::CloneMethod;
use patchbot::output::{emoji, OutputConfig};
use patchbot::workflow::{MergeJob, Workflow};

use super::common::{finish_batch, load_repositories, print_entry, progress_bar};

/// Merge branches in every repository of a discovery file
#[derive(Args, Debug)]
pub struct BatchMergeArgs {
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

    /// Branch to merge from
    #[arg(long, value_name = "BRANCH")]
    pub source: String,

    /// Branch to merge into (default: each repository's default branch)
    #[arg(long, value_name = "BRANCH")]
    pub target: Option<String>,

    /// Clone over SSH or HTTPS
    #[arg(long, value_enum, default_value_t = CloneMethod::Ssh)]
    pub clone_method: CloneMethod,

    /// Parent directory for repository checkouts
    #[arg(short = 'd', long, value_name = "PATH", env = "PATCHBOT_WORKING_DIRECTORY")]
    pub working_directory: Option<PathBuf>,

    /// Show what would be done without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Execute the batch-merge command
pub fn execute(args: BatchMergeArgs, output: &OutputConfig) -> Result<()> {
    let repositories = load_repositories(&args.file, &args.filter)?;
    if repositories.is_empty() {
        println!("No repositories match in {}", args.file.display());
        return Ok(());
    }
    let working_directory = args
        .working_directory
        .unwrap_or_else(default_working_directory);

    if args.dry_run {
        println!(
            "{} DRY RUN MODE - No changes will be made",
            emoji(output, "🔎", "[DRY RUN]")
        );
    }
    println!(
        "{} Merging {} in {} repositories",
        emoji(output, "🔀", "[BATCH]"),
        args.source,
        repositories.len()
    );

    let workflow = Workflow::new();
    let bar = progress_bar(repositories.len(), false);
    let result = run_batch(
        &repositories,
        |repository| {
            bar.set_message(repository.path_with_namespace.clone());
            let mut job = MergeJob::new(
                repository.clone_url(args.clone_method),
                working_directory.clone(),
                args.source.clone(),
                args.target
                    .clone()
                    .unwrap_or_else(|| repository.default_branch.clone()),
            );
            job.dry_run = args.dry_run;
            workflow.run_merge(&job)
        },
        |entry| print_entry(&bar, output, entry),
    );

    finish_batch(&bar, output, &result)
}
