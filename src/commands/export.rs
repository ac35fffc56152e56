//! Export command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use patchbot::defaults::default_patch_source_directory;
use patchbot::output::{emoji, OutputConfig};
use patchbot::scaffold::export_patch;

/// Export a patch to another directory
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Name of the patch to export
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Destination directory
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Directory containing the patch directories
    #[arg(
        short = 's',
        long,
        value_name = "PATH",
        env = "PATCHBOT_PATCH_SOURCE_DIRECTORY"
    )]
    pub patch_source_directory: Option<PathBuf>,

    /// Overwrite an existing destination
    #[arg(long)]
    pub force: bool,
}

/// Execute the export command
pub fn execute(args: ExportArgs, output: &OutputConfig) -> Result<()> {
    let source_dir = args
        .patch_source_directory
        .unwrap_or_else(default_patch_source_directory);
    let dir = export_patch(&source_dir, &args.name, &args.dest, args.force)?;

    println!(
        "{} Exported {} to {}",
        emoji(output, "✅", "[OK]"),
        args.name,
        dir.display()
    );
    Ok(())
}
