//! Merge command implementation
//!
//! Merges `--source` into `--target` in one repository and pushes the
//! target. Nothing is pushed when the source is already part of the target.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use patchbot::defaults::default_working_directory;
use patchbot::output::{emoji, OutputConfig};
use patchbot::suggestions;
use patchbot::workflow::{MergeJob, Workflow};

/// Merge a source branch into a target branch of one repository
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Clone URL of the repository
    #[arg(long, value_name = "URL")]
    pub repository_url: Option<String>,

    /// Branch to merge from
    #[arg(long, value_name = "BRANCH")]
    pub source: String,

    /// Branch to merge into and push
    #[arg(long, value_name = "BRANCH")]
    pub target: String,

    /// Parent directory for repository checkouts
    #[arg(short = 'd', long, value_name = "PATH", env = "PATCHBOT_WORKING_DIRECTORY")]
    pub working_directory: Option<PathBuf>,

    /// Show what would be done without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Execute the merge command
pub fn execute(args: MergeArgs, output: &OutputConfig) -> Result<()> {
    let repository_url = args
        .repository_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(suggestions::missing_repository_url)?;

    let mut job = MergeJob::new(
        repository_url,
        args.working_directory
            .unwrap_or_else(default_working_directory),
        args.source,
        args.target,
    );
    job.dry_run = args.dry_run;

    if args.dry_run {
        println!(
            "{} DRY RUN MODE - No changes will be made",
            emoji(output, "🔎", "[DRY RUN]")
        );
    }

    let outcome = Workflow::new().run_merge(&job)?;
    let marker = if outcome.is_success() {
        emoji(output, "✅", "[OK]")
    } else {
        emoji(output, "⏭️", "[SKIP]")
    };
    println!("{} {}: {}", marker, job.repository_url, outcome);
    Ok(())
}
