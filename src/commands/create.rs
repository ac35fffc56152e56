//! Create command implementation
//!
//! Scaffolds a new patch directory with a template mechanism file and a
//! commit message.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use patchbot::defaults::default_patch_source_directory;
use patchbot::output::{emoji, OutputConfig};
use patchbot::scaffold::{create_patch, PatchType};

/// Create a new patch from a template
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the new patch directory
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Patch mechanism
    #[arg(short = 't', long = "type", value_enum, default_value_t = PatchType::Sh)]
    pub patch_type: PatchType,

    /// Directory containing the patch directories
    #[arg(
        short = 's',
        long,
        value_name = "PATH",
        env = "PATCHBOT_PATCH_SOURCE_DIRECTORY"
    )]
    pub patch_source_directory: Option<PathBuf>,

    /// Overwrite an existing patch
    #[arg(long)]
    pub force: bool,
}

/// Execute the create command
pub fn execute(args: CreateArgs, output: &OutputConfig) -> Result<()> {
    let source_dir = args
        .patch_source_directory
        .unwrap_or_else(default_patch_source_directory);
    let dir = create_patch(&source_dir, &args.name, args.patch_type, args.force)?;

    println!(
        "{} Created patch {} in {}",
        emoji(output, "✅", "[OK]"),
        args.name,
        dir.display()
    );
    println!(
        "{} Edit {} and commit-message.txt, then run `patchbot patch --patch-name {}`",
        emoji(output, "💡", "[NEXT]"),
        args.patch_type.file_name(),
        args.name
    );
    Ok(())
}
