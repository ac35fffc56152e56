//! List command implementation
//!
//! Prints the repositories a batch command would visit, after filters.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use patchbot::defaults::DEFAULT_DISCOVERY_FILE;

use super::common::load_repositories;

/// List the repositories of a discovery file
#[derive(Args, Debug)]
pub struct ListArgs {
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
}

/// Execute the list command
pub fn execute(args: ListArgs) -> Result<()> {
    let repositories = load_repositories(&args.file, &args.filter)?;

    for repository in &repositories {
        if repository.topics.is_empty() {
            println!(
                "{} ({})",
                repository.path_with_namespace, repository.default_branch
            );
        } else {
            println!(
                "{} ({}) [{}]",
                repository.path_with_namespace,
                repository.default_branch,
                repository.topics.join(", ")
            );
        }
    }
    println!();
    println!("{} repositories", repositories.len());
    Ok(())
}
