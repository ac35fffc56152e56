//! # Discovery File
//!
//! The discovery file is the JSON record of repositories enumerated from a
//! hosting namespace. It is written by the `discover` command and read by the
//! batch commands:
//!
//! ```json
//! {
//!   "generated": "2024-05-01T12:00:00Z",
//!   "source": { "namespace": "acme", "url": "https://gitlab.com", "type": "group" },
//!   "repositories": [
//!     {
//!       "name": "api",
//!       "path_with_namespace": "acme/api",
//!       "url": "https://gitlab.com/acme/api",
//!       "clone_url_ssh": "git@gitlab.com:acme/api.git",
//!       "clone_url_http": "https://gitlab.com/acme/api.git",
//!       "default_branch": "main",
//!       "topics": ["php"]
//!     }
//!   ]
//! }
//! ```
//!
//! Records are read-only once loaded; filtering happens on copies in memory.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Whether the discovered namespace is a group or a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceKind {
    Group,
    User,
}

impl std::fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NamespaceKind::Group => write!(f, "group"),
            NamespaceKind::User => write!(f, "user"),
        }
    }
}

/// Where the repository list came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverySource {
    pub namespace: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: NamespaceKind,
}

/// One repository of the discovery file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub path_with_namespace: String,
    pub url: String,
    pub clone_url_ssh: String,
    pub clone_url_http: String,
    #[serde(default = "default_branch_name")]
    pub default_branch: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
}

fn default_branch_name() -> String {
    crate::defaults::DEFAULT_SOURCE_BRANCH.to_string()
}

/// Which clone URL of a record to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CloneMethod {
    /// Clone over SSH (`clone_url_ssh`)
    #[default]
    Ssh,
    /// Clone over HTTPS (`clone_url_http`)
    Https,
}

impl RepositoryRecord {
    pub fn clone_url(&self, method: CloneMethod) -> &str {
        match method {
            CloneMethod::Ssh => &self.clone_url_ssh,
            CloneMethod::Https => &self.clone_url_http,
        }
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

/// The whole discovery document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryFile {
    pub generated: DateTime<Utc>,
    pub source: DiscoverySource,
    pub repositories: Vec<RepositoryRecord>,
}

impl DiscoveryFile {
    /// New document stamped with the current time.
    pub fn new(source: DiscoverySource, repositories: Vec<RepositoryRecord>) -> Self {
        Self {
            generated: Utc::now(),
            source,
            repositories,
        }
    }

    /// Read and parse a discovery file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::DiscoveryFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| Error::DiscoveryFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Write the document as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(path, json).map_err(|e| Error::DiscoveryFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
