//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_patch("template", "patch.sh", "true");
//!     fixture.patchbot().args(["patch", "--dry-run"]).assert().failure();
//! }
//! ```
//!
//! Tests that run real `git` use [`TestFixture::create_origin`] to get a local
//! bare repository acting as the remote, so nothing touches the network.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git, Repo};
    pub use super::TestFixture;
}

/// Commit message written next to every fixture patch.
pub const COMMIT_MESSAGE: &str = "Add example file\n\nCreated by the test fixture.\n";

/// Environment variables that would leak the developer's setup into tests.
const PATCHBOT_ENV: &[&str] = &[
    "PATCHBOT_WORKING_DIRECTORY",
    "PATCHBOT_PATCH_SOURCE_DIRECTORY",
    "PATCHBOT_GITLAB_TOKEN",
    "PATCHBOT_GITLAB_URL",
    "PATCHBOT_DISCOVERY_FILE",
    "RUST_LOG",
];

/// Identity for commits made by tests and by the binary under test.
const GIT_IDENTITY: &[(&str, &str)] = &[
    ("GIT_AUTHOR_NAME", "Patchbot Test"),
    ("GIT_AUTHOR_EMAIL", "patchbot@example.com"),
    ("GIT_COMMITTER_NAME", "Patchbot Test"),
    ("GIT_COMMITTER_EMAIL", "patchbot@example.com"),
];

/// Run git in `dir` and return its stdout; panics when git fails.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .envs(GIT_IDENTITY.iter().copied())
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A repository entry for a fixture discovery file.
pub struct Repo<'a> {
    pub path: &'a str,
    pub clone_url: &'a str,
    pub topics: &'a [&'a str],
}

/// A test fixture that provides a temporary directory with patches,
/// discovery files and local Git remotes.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_patch("template", "patch.sh", "echo ok > example.txt");
///
/// fixture
///     .patchbot()
///     .args(["create", "other"])
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the fixture.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add `patches/<name>/<mechanism>` plus a commit message.
    pub fn with_patch(self, name: &str, mechanism: &str, content: &str) -> Self {
        self.with_file(&format!("patches/{}/{}", name, mechanism), content)
            .with_file(&format!("patches/{}/commit-message.txt", name), COMMIT_MESSAGE)
    }

    /// Add `repositories.json` listing `repos`.
    pub fn with_discovery_file(self, repos: &[Repo]) -> Self {
        let repositories: Vec<serde_json::Value> = repos
            .iter()
            .map(|repo| {
                let name = repo.path.rsplit('/').next().unwrap_or(repo.path);
                serde_json::json!({
                    "name": name,
                    "path_with_namespace": repo.path,
                    "url": format!("https://gitlab.example.com/{}", repo.path),
                    "clone_url_ssh": repo.clone_url,
                    "clone_url_http": repo.clone_url,
                    "default_branch": "main",
                    "topics": repo.topics,
                })
            })
            .collect();
        let document = serde_json::json!({
            "generated": "2024-05-01T12:00:00Z",
            "source": { "namespace": "acme", "url": "https://gitlab.example.com", "type": "group" },
            "repositories": repositories,
        });
        let content = serde_json::to_string_pretty(&document).expect("Failed to encode JSON");
        self.with_file("repositories.json", &content)
    }

    /// The binary under test, run inside the fixture with a clean environment.
    pub fn patchbot(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("patchbot");
        cmd.current_dir(self.path());
        for var in PATCHBOT_ENV {
            cmd.env_remove(var);
        }
        cmd.envs(GIT_IDENTITY.iter().copied());
        cmd
    }

    /// Create a bare repository `<name>.git` whose `main` holds a README.
    ///
    /// Returns the bare repository path, usable as a clone URL.
    pub fn create_origin(&self, name: &str) -> PathBuf {
        let origin = self.child(&format!("{}.git", name));
        git(
            self.path(),
            &["init", "--bare", "-b", "main", &origin.to_string_lossy()],
        );

        let seed = self.child(&format!("seed-{}", name));
        git(
            self.path(),
            &["clone", &origin.to_string_lossy(), &seed.to_string_lossy()],
        );
        git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        std::fs::write(seed.join("README.md"), "# Example\n").expect("Failed to write README");
        git(&seed, &["add", "-A"]);
        git(&seed, &["commit", "-m", "Initial commit"]);
        git(&seed, &["push", "origin", "main"]);
        origin
    }

    /// Push a commit adding `file` on a new `branch` of the origin `name`.
    pub fn push_branch(&self, name: &str, branch: &str, file: &str, content: &str) {
        let seed = self.child(&format!("seed-{}", name));
        git(&seed, &["checkout", "main"]);
        git(&seed, &["checkout", "-b", branch]);
        std::fs::write(seed.join(file), content).expect("Failed to write file");
        git(&seed, &["add", "-A"]);
        git(&seed, &["commit", "-m", &format!("Add {}", file)]);
        git(&seed, &["push", "origin", branch]);
        git(&seed, &["checkout", "main"]);
    }

    /// Content of `file` on `branch` of a bare origin, if present.
    pub fn origin_file(&self, origin: &Path, branch: &str, file: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["show", &format!("{}:{}", branch, file)])
            .current_dir(origin)
            .output()
            .expect("Failed to run git");
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
