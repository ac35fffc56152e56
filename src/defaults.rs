//! Default values for patchbot configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Branch that feature branches start from when none is given.
pub const DEFAULT_SOURCE_BRANCH: &str = "main";

/// Patch used when `--patch-name` is omitted.
pub const DEFAULT_PATCH_NAME: &str = "template";

/// Discovery file read by the batch commands and written by `discover`.
pub const DEFAULT_DISCOVERY_FILE: &str = "repositories.json";

/// GitLab instance queried by `discover` and used for merge requests.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

/// Returns the default parent directory for repository checkouts.
///
/// Uses the platform-appropriate cache directory:
/// - Linux: `~/.cache/patchbot/repositories` (XDG Base Directory)
/// - macOS: `~/Library/Caches/patchbot/repositories`
/// - Windows: `{FOLDERID_LocalAppData}\patchbot\repositories`
///
/// Falls back to `.patchbot-repositories` in the current directory if the
/// platform cache directory cannot be determined.
///
/// This can be overridden by the `--working-directory` CLI flag or the
/// `PATCHBOT_WORKING_DIRECTORY` environment variable.
pub fn default_working_directory() -> PathBuf {
    match dirs::cache_dir() {
        Some(cache) => cache.join("patchbot").join("repositories"),
        None => PathBuf::from(".patchbot-repositories"),
    }
}

/// Returns the default directory holding patch directories: `./patches`.
pub fn default_patch_source_directory() -> PathBuf {
    PathBuf::from("patches")
}
