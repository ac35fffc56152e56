//! Discover command implementation
//!
//! Lists every non-archived project of a GitLab group (with subgroups) or
//! user and writes them to the discovery file used by the batch commands.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use patchbot::defaults::{DEFAULT_DISCOVERY_FILE, DEFAULT_GITLAB_URL};
use patchbot::gitlab::GitLabClient;
use patchbot::output::{emoji, OutputConfig};
use patchbot::suggestions;

/// Discover the repositories of a GitLab group or user
#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Group path (e.g. acme or acme/team) or username
    #[arg(value_name = "NAMESPACE")]
    pub namespace: String,

    /// GitLab instance to query
    #[arg(long, value_name = "URL", env = "PATCHBOT_GITLAB_URL", default_value = DEFAULT_GITLAB_URL)]
    pub gitlab_url: String,

    /// GitLab access token
    #[arg(long, value_name = "TOKEN", env = "PATCHBOT_GITLAB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// File to write the repository list to
    #[arg(
        short = 'o',
        long,
        value_name = "PATH",
        env = "PATCHBOT_DISCOVERY_FILE",
        default_value = DEFAULT_DISCOVERY_FILE
    )]
    pub output: PathBuf,
}

/// Execute the discover command
pub fn execute(args: DiscoverArgs, output: &OutputConfig) -> Result<()> {
    let token = args
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(suggestions::missing_token)?;
    let client = GitLabClient::new(&args.gitlab_url, token)?;

    println!(
        "{} Discovering repositories of {} on {}",
        emoji(output, "🔍", "[SCAN]"),
        args.namespace,
        client.base_url()
    );
    let discovery = client.discover(&args.namespace)?;
    discovery.save(&args.output)?;

    println!(
        "{} Found {} repositories in {} '{}'",
        emoji(output, "✅", "[OK]"),
        discovery.repositories.len(),
        discovery.source.kind,
        discovery.source.namespace
    );
    println!("   Written to: {}", args.output.display());
    Ok(())
}
