//! Import command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use patchbot::defaults::default_patch_source_directory;
use patchbot::output::{emoji, OutputConfig};
use patchbot::scaffold::import_patch;

/// Import a patch directory into the patch source directory
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Patch directory to import
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Name to store the patch under (default: the directory name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

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

/// Execute the import command
pub fn execute(args: ImportArgs, output: &OutputConfig) -> Result<()> {
    let source_dir = args
        .patch_source_directory
        .unwrap_or_else(default_patch_source_directory);
    let dir = import_patch(&args.path, &source_dir, args.name.as_deref(), args.force)?;

    println!(
        "{} Imported {} to {}",
        emoji(output, "✅", "[OK]"),
        args.path.display(),
        dir.display()
    );
    Ok(())
}
