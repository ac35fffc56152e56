//! # GitLab Client
//!
//! A small blocking client for the GitLab v4 REST API, covering the two calls
//! patchbot needs:
//!
//! - **Discovery**: list every non-archived project of a namespace. The
//!   namespace is tried as a group first (including subgroups); if the group
//!   does not exist (404) it is looked up as a user. Results are paginated
//!   100 at a time until a short page comes back.
//!
//! - **Merge requests**: open a merge request for a pushed feature branch.
//!
//! Failures are reported as [`Error::Remote`] and never retried.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults::DEFAULT_SOURCE_BRANCH;
use crate::discovery::{DiscoveryFile, DiscoverySource, NamespaceKind, RepositoryRecord};
use crate::error::{Error, Result};
use crate::workflow::{MergeRequest, MergeRequestCreator};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size for project listings (the API maximum).
const PER_PAGE: usize = 100;

#[derive(Deserialize)]
struct Project {
    name: String,
    path_with_namespace: String,
    web_url: String,
    ssh_url_to_repo: String,
    http_url_to_repo: String,
    default_branch: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
}

impl From<Project> for RepositoryRecord {
    fn from(project: Project) -> Self {
        Self {
            name: project.name,
            path_with_namespace: project.path_with_namespace,
            url: project.web_url,
            clone_url_ssh: project.ssh_url_to_repo,
            clone_url_http: project.http_url_to_repo,
            default_branch: project
                .default_branch
                .unwrap_or_else(|| DEFAULT_SOURCE_BRANCH.to_string()),
            topics: project.topics,
        }
    }
}

#[derive(Deserialize)]
struct User {
    id: u64,
}

#[derive(Serialize)]
struct CreateMrPayload<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Deserialize)]
struct CreatedMr {
    web_url: String,
}

/// GitLab API client using blocking reqwest
pub struct GitLabClient {
    client: Client,
    base_url: String,
    token: String,
}

impl GitLabClient {
    /// Create a client for the instance at `base_url`, e.g. `https://gitlab.com`.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::usage(format!(
                "GitLab URL must use http or https: {}",
                base_url
            )));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.base_url, path)
    }

    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response> {
        debug!("GET {} {:?}", url, query);
        Ok(self
            .client
            .get(url)
            .header("PRIVATE-TOKEN", &self.token)
            .header("Accept", "application/json")
            .query(query)
            .send()?)
    }

    /// List the repositories of `namespace` and wrap them in a discovery document.
    pub fn discover(&self, namespace: &str) -> Result<DiscoveryFile> {
        let (kind, repositories) = match self.discover_group(namespace)? {
            Some(repositories) => (NamespaceKind::Group, repositories),
            None => (NamespaceKind::User, self.discover_user(namespace)?),
        };
        Ok(DiscoveryFile::new(
            DiscoverySource {
                namespace: namespace.to_string(),
                url: self.base_url.clone(),
                kind,
            },
            repositories,
        ))
    }

    /// Projects of a group and its subgroups, or `None` if there is no such group.
    pub fn discover_group(&self, group: &str) -> Result<Option<Vec<RepositoryRecord>>> {
        let url = self.api_url(&format!("/groups/{}/projects", urlencoding::encode(group)));
        self.fetch_projects(&url, &[("include_subgroups", "true".to_string())])
    }

    /// Projects owned by a user.
    pub fn discover_user(&self, username: &str) -> Result<Vec<RepositoryRecord>> {
        let url = self.api_url("/users");
        let response = check(self.get(&url, &[("username", username.to_string())])?, &url)?;
        let users: Vec<User> = response.json()?;
        let user = users.first().ok_or_else(|| Error::Remote {
            url: url.clone(),
            message: format!("Namespace '{}' is neither a group nor a user", username),
        })?;

        let url = self.api_url(&format!("/users/{}/projects", user.id));
        self.fetch_projects(&url, &[])?.ok_or_else(|| Error::Remote {
            url,
            message: format!("User '{}' not found", username),
        })
    }

    /// Fetch all pages of a project listing. `None` when the first page is 404.
    fn fetch_projects(
        &self,
        url: &str,
        extra: &[(&str, String)],
    ) -> Result<Option<Vec<RepositoryRecord>>> {
        let mut repositories = Vec::new();
        let mut page = 1;
        loop {
            let mut query = vec![
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
                ("archived", "false".to_string()),
            ];
            query.extend(extra.iter().cloned());

            let response = self.get(url, &query)?;
            if page == 1 && response.status() == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            let projects: Vec<Project> = check(response, url)?.json()?;
            let count = projects.len();
            repositories.extend(projects.into_iter().map(RepositoryRecord::from));

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }
        debug!("{} repositories from {}", repositories.len(), url);
        Ok(Some(repositories))
    }
}

impl MergeRequestCreator for GitLabClient {
    fn create_merge_request(&self, request: &MergeRequest) -> Result<String> {
        let url = self.api_url(&format!(
            "/projects/{}/merge_requests",
            urlencoding::encode(&request.project)
        ));
        debug!("POST {}", url);

        let payload = CreateMrPayload {
            source_branch: &request.source_branch,
            target_branch: &request.target_branch,
            title: &request.title,
            description: Some(request.description.as_str()).filter(|d| !d.is_empty()),
        };
        let response = self
            .client
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(&payload)
            .send()?;
        let created: CreatedMr = check(response, &url)?.json()?;
        Ok(created.web_url)
    }
}

/// Turn a non-success response into [`Error::Remote`].
fn check(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(Error::Remote {
        url: url.to_string(),
        message: format!("{} {}", status, body.trim()),
    })
}
