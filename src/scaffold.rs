//! # Patch Scaffolding
//!
//! Helpers behind the `create`, `import` and `export` commands. A patch
//! directory is a mechanism file plus `commit-message.txt`:
//!
//! ```text
//! patches/
//!   update-readme/
//!     patch.sh
//!     commit-message.txt
//! ```
//!
//! Existing targets are never overwritten unless `force` is set, in which case
//! the old directory is removed first. Import and export refuse a target that
//! overlaps the source patch, with or without `force`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::info;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::provider::ProviderResolver;
use crate::workflow::{read_commit_message, COMMIT_MESSAGE_FILE};

/// Mechanism type of a new patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PatchType {
    /// PHP script run with `php`
    Php,
    /// Shell script run with `bash`
    #[default]
    Sh,
    /// Python script run with `python3`
    Py,
    /// Unified diff applied with `git apply`
    Diff,
}

impl PatchType {
    pub fn file_name(self) -> &'static str {
        match self {
            PatchType::Php => "patch.php",
            PatchType::Sh => "patch.sh",
            PatchType::Py => "patch.py",
            PatchType::Diff => "patch.diff",
        }
    }

    fn template(self) -> &'static str {
        match self {
            PatchType::Php => PHP_TEMPLATE,
            PatchType::Sh => SHELL_TEMPLATE,
            PatchType::Py => PYTHON_TEMPLATE,
            PatchType::Diff => DIFF_TEMPLATE,
        }
    }
}

const PHP_TEMPLATE: &str = r#"<?php

// Runs with the repository checkout as working directory.
// Keep it idempotent: a second run must not change anything.

file_put_contents('example.txt', 'example content' . PHP_EOL);
"#;

const SHELL_TEMPLATE: &str = r#"#!/usr/bin/env bash
set -euo pipefail

# Runs with the repository checkout as working directory.
# Keep it idempotent: a second run must not change anything.

echo 'example content' > example.txt
"#;

const PYTHON_TEMPLATE: &str = r#"# Runs with the repository checkout as working directory.
# Keep it idempotent: a second run must not change anything.

with open('example.txt', 'w') as f:
    f.write('example content\n')
"#;

const DIFF_TEMPLATE: &str = r#"diff --git a/example.txt b/example.txt
new file mode 100644
--- /dev/null
+++ b/example.txt
@@ -0,0 +1 @@
+example content
"#;

const COMMIT_MESSAGE_TEMPLATE: &str = "Add example file

Describe what this patch changes and why.
";

/// Create a new patch directory `source_dir/name` from a template.
pub fn create_patch(
    source_dir: &Path,
    name: &str,
    patch_type: PatchType,
    force: bool,
) -> Result<PathBuf> {
    validate_name(name)?;
    let target = source_dir.join(name);
    prepare_target(&target, force)?;

    fs::create_dir_all(&target)?;
    fs::write(target.join(patch_type.file_name()), patch_type.template())?;
    fs::write(target.join(COMMIT_MESSAGE_FILE), COMMIT_MESSAGE_TEMPLATE)?;
    info!("Created {} patch in {}", patch_type.file_name(), target.display());
    Ok(target)
}

/// Copy an external patch directory into `source_dir`.
///
/// The directory must be a valid patch (one mechanism file and a commit
/// message). It is stored under `name`, or under its own directory name.
pub fn import_patch(
    from: &Path,
    source_dir: &Path,
    name: Option<&str>,
    force: bool,
) -> Result<PathBuf> {
    validate_patch(from)?;

    let name = match name {
        Some(name) => name.to_string(),
        None => from
            .canonicalize()?
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Scaffold {
                message: format!("Cannot derive a patch name from {}", from.display()),
            })?,
    };
    validate_name(&name)?;

    let target = source_dir.join(&name);
    reject_overlap(from, &target)?;
    prepare_target(&target, force)?;
    copy_dir(from, &target)?;
    info!("Imported {} as {}", from.display(), target.display());
    Ok(target)
}

/// Copy the patch `source_dir/name` to `dest`.
pub fn export_patch(source_dir: &Path, name: &str, dest: &Path, force: bool) -> Result<PathBuf> {
    let patch = source_dir.join(name);
    validate_patch(&patch)?;
    reject_overlap(&patch, dest)?;
    prepare_target(dest, force)?;
    copy_dir(&patch, dest)?;
    info!("Exported {} to {}", patch.display(), dest.display());
    Ok(dest.to_path_buf())
}

/// Names of the patch directories in `source_dir`, sorted. Empty when the
/// directory does not exist.
pub fn list_patches(source_dir: &Path) -> Result<Vec<String>> {
    if !source_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::Scaffold {
            message: format!("Invalid patch name '{}': use a single directory name", name),
        });
    }
    Ok(())
}

fn validate_patch(dir: &Path) -> Result<()> {
    ProviderResolver::new().resolve(dir)?;
    read_commit_message(dir)?;
    Ok(())
}

/// Refuse a copy whose target is the source, contains it, or lies inside it.
fn reject_overlap(source: &Path, target: &Path) -> Result<()> {
    let source = source.canonicalize()?;
    let target = resolve(target)?;
    if source.starts_with(&target) || target.starts_with(&source) {
        return Err(Error::Scaffold {
            message: format!(
                "Cannot copy {} to {}: the paths overlap",
                source.display(),
                target.display()
            ),
        });
    }
    Ok(())
}

/// Canonical form of a path that may not exist yet, resolved through its
/// nearest existing ancestor.
fn resolve(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.canonicalize()?);
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => Ok(resolve(parent)?.join(name)),
        _ => Ok(absolute),
    }
}

fn prepare_target(target: &Path, force: bool) -> Result<()> {
    if !target.exists() {
        return Ok(());
    }
    if !force {
        return Err(Error::Scaffold {
            message: format!(
                "{} already exists\n  hint: use --force to overwrite it",
                target.display()
            ),
        });
    }
    if target.is_dir() {
        fs::remove_dir_all(target)?;
    } else {
        fs::remove_file(target)?;
    }
    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to)?;
    for entry in WalkDir::new(from).min_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|_| Error::Scaffold {
                message: format!("Failed to make path relative: {}", entry.path().display()),
            })?;
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
