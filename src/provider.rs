//! # Patch Providers
//!
//! A patch directory holds exactly one *mechanism* file that produces the
//! patch's changes, next to a `commit-message.txt`. Each mechanism is handled
//! by a [`PatchProvider`]:
//!
//! | File         | Provider                 | Invocation              |
//! |--------------|--------------------------|-------------------------|
//! | `patch.php`  | [`ScriptProvider::php`]  | `php patch.php`         |
//! | `patch.sh`   | [`ScriptProvider::shell`]| `bash patch.sh`         |
//! | `patch.diff` | [`DiffProvider`]         | `git apply patch.diff`  |
//! | `patch.py`   | [`ScriptProvider::python`]| `python3 patch.py`     |
//!
//! The [`ProviderResolver`] checks every provider against a directory and
//! insists on exactly one match.
//!
//! Mechanisms run with the repository checkout as their working directory.
//! Their exit status is not interpreted: whether a patch did
//! anything is decided afterwards by looking at the repository's dirty state.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};
use crate::git;

/// A mechanism that turns a patch directory into file changes in a checkout.
pub trait PatchProvider: Send + Sync {
    /// The entry file this provider recognizes, e.g. `patch.sh`.
    fn file_name(&self) -> &'static str;

    /// Whether `patch_dir` contains this provider's entry file.
    fn supports(&self, patch_dir: &Path) -> bool {
        patch_dir.join(self.file_name()).is_file()
    }

    /// Run the mechanism against `working_dir` and return its combined output.
    fn execute(&self, patch_dir: &Path, working_dir: &Path) -> Result<String>;
}

/// Runs the entry file with a language interpreter.
#[derive(Debug, Clone)]
pub struct ScriptProvider {
    file_name: &'static str,
    interpreter: &'static str,
}

impl ScriptProvider {
    pub fn php() -> Self {
        Self {
            file_name: "patch.php",
            interpreter: "php",
        }
    }

    pub fn shell() -> Self {
        Self {
            file_name: "patch.sh",
            interpreter: "bash",
        }
    }

    pub fn python() -> Self {
        Self {
            file_name: "patch.py",
            interpreter: "python3",
        }
    }

    pub fn interpreter(&self) -> &'static str {
        self.interpreter
    }
}

impl PatchProvider for ScriptProvider {
    fn file_name(&self) -> &'static str {
        self.file_name
    }

    fn execute(&self, patch_dir: &Path, working_dir: &Path) -> Result<String> {
        let script = entry_file(patch_dir, self.file_name)?;
        debug!(
            "{} {} (in {})",
            self.interpreter,
            script.display(),
            working_dir.display()
        );

        let output = Command::new(self.interpreter)
            .arg(&script)
            .current_dir(working_dir)
            .output()
            .map_err(|e| Error::PatchExecutionFailed {
                file: script.display().to_string(),
                message: format!("could not run {}: {}", self.interpreter, e),
            })?;

        if !output.status.success() {
            debug!("{} exited with {}", script.display(), output.status);
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(combined)
    }
}

/// Applies `patch.diff` with `git apply`.
#[derive(Debug, Clone, Default)]
pub struct DiffProvider;

impl PatchProvider for DiffProvider {
    fn file_name(&self) -> &'static str {
        "patch.diff"
    }

    fn execute(&self, patch_dir: &Path, working_dir: &Path) -> Result<String> {
        let diff = entry_file(patch_dir, self.file_name())?;
        let result = git::apply(working_dir, &diff).map_err(|e| Error::PatchExecutionFailed {
            file: diff.display().to_string(),
            message: e.to_string(),
        })?;
        if !result.success {
            debug!("git apply {} did not succeed", diff.display());
        }
        Ok(result.output)
    }
}

/// Absolute path of a mechanism file, so it stays valid when the child
/// process runs in a different directory.
fn entry_file(patch_dir: &Path, file_name: &str) -> Result<PathBuf> {
    Ok(std::path::absolute(patch_dir.join(file_name))?)
}

/// Picks the single provider matching a patch directory.
pub struct ProviderResolver {
    providers: Vec<Box<dyn PatchProvider>>,
}

impl Default for ProviderResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderResolver {
    /// Resolver over the built-in providers, in the order php, sh, diff, py.
    pub fn new() -> Self {
        Self {
            providers: vec![
                Box::new(ScriptProvider::php()),
                Box::new(ScriptProvider::shell()),
                Box::new(DiffProvider),
                Box::new(ScriptProvider::python()),
            ],
        }
    }

    /// Resolver over a custom provider list.
    pub fn with_providers(providers: Vec<Box<dyn PatchProvider>>) -> Self {
        Self { providers }
    }

    /// Entry file names of all known providers, in resolver order.
    pub fn supported_files(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.file_name()).collect()
    }

    /// Resolve the provider for `patch_dir`.
    ///
    /// Fails with [`Error::PatchNotFound`] if the directory does not exist,
    /// [`Error::NoProviderFound`] if no entry file is present and
    /// [`Error::AmbiguousProvider`] if more than one is.
    pub fn resolve(&self, patch_dir: &Path) -> Result<&dyn PatchProvider> {
        if !patch_dir.is_dir() {
            return Err(Error::PatchNotFound {
                path: patch_dir.display().to_string(),
            });
        }

        let matches: Vec<&dyn PatchProvider> = self
            .providers
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| p.supports(patch_dir))
            .collect();

        match matches.as_slice() {
            [] => Err(Error::NoProviderFound {
                path: patch_dir.display().to_string(),
                supported: self.supported_files().join(", "),
            }),
            [provider] => {
                debug!(
                    "resolved {} in {}",
                    provider.file_name(),
                    patch_dir.display()
                );
                Ok(*provider)
            }
            _ => Err(Error::AmbiguousProvider {
                path: patch_dir.display().to_string(),
                files: matches.iter().map(|p| p.file_name().to_string()).collect(),
            }),
        }
    }
}
