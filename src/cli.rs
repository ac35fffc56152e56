//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use crate::commands;
use patchbot::output::{ColorChoice, OutputConfig};

/// Patchbot - Apply scripted patches across many Git repositories
#[derive(Parser, Debug)]
#[command(name = "patchbot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output
    #[arg(long, global = true, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a patch to one repository
    Patch(commands::patch::PatchArgs),

    /// Merge a source branch into a target branch of one repository
    Merge(commands::merge::MergeArgs),

    /// Apply a patch to every repository of a discovery file
    BatchPatch(commands::batch_patch::BatchPatchArgs),

    /// Merge branches in every repository of a discovery file
    BatchMerge(commands::batch_merge::BatchMergeArgs),

    /// Discover the repositories of a GitLab group or user
    Discover(commands::discover::DiscoverArgs),

    /// List the repositories of a discovery file
    List(commands::list::ListArgs),

    /// Create a new patch from a template
    Create(commands::create::CreateArgs),

    /// Import a patch directory into the patch source directory
    Import(commands::import::ImportArgs),

    /// Export a patch to another directory
    Export(commands::export::ExportArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or(&self.log_level))
            .format_timestamp(None)
            .try_init();
        let output = OutputConfig::new(self.color);

        match self.command {
            Commands::Patch(args) => commands::patch::execute(args, &output),
            Commands::Merge(args) => commands::merge::execute(args, &output),
            Commands::BatchPatch(args) => commands::batch_patch::execute(args, &output),
            Commands::BatchMerge(args) => commands::batch_merge::execute(args, &output),
            Commands::Discover(args) => commands::discover::execute(args, &output),
            Commands::List(args) => commands::list::execute(args),
            Commands::Create(args) => commands::create::execute(args, &output),
            Commands::Import(args) => commands::import::execute(args, &output),
            Commands::Export(args) => commands::export::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
