//! Repository filters for batch runs.
//!
//! A filter expression has the form `kind:value`:
//!
//! - `path:<glob>` keeps repositories whose namespaced path matches the glob,
//!   e.g. `path:acme/*` or `path:*service*`.
//! - `topic:<name>` keeps repositories tagged with the topic.
//!
//! Multiple filters must all match. Expressions with an unknown kind, or
//! without a `:`, are skipped with a warning so a typo never aborts a batch.

use glob::Pattern;
use log::warn;

use crate::discovery::RepositoryRecord;
use crate::error::Result;

/// A parsed filter expression.
#[derive(Debug, Clone)]
pub enum RepositoryFilter {
    Path(Pattern),
    Topic(String),
}

impl RepositoryFilter {
    /// Parse one expression. Returns `Ok(None)` for expressions that are
    /// ignored and `Err` only for an invalid glob.
    pub fn parse(expression: &str) -> Result<Option<Self>> {
        let Some((kind, value)) = expression.split_once(':') else {
            warn!("Ignoring filter '{}': expected kind:value", expression);
            return Ok(None);
        };

        match kind.trim() {
            "path" => Ok(Some(RepositoryFilter::Path(Pattern::new(value.trim())?))),
            "topic" => Ok(Some(RepositoryFilter::Topic(value.trim().to_string()))),
            other => {
                warn!(
                    "Ignoring filter '{}': unknown filter kind '{}' (supported: path, topic)",
                    expression, other
                );
                Ok(None)
            }
        }
    }

    pub fn matches(&self, repository: &RepositoryRecord) -> bool {
        match self {
            RepositoryFilter::Path(pattern) => pattern.matches(&repository.path_with_namespace),
            RepositoryFilter::Topic(topic) => repository.has_topic(topic),
        }
    }
}

/// Parse all expressions, dropping ignored ones.
pub fn parse_filters<S: AsRef<str>>(expressions: &[S]) -> Result<Vec<RepositoryFilter>> {
    let mut filters = Vec::new();
    for expression in expressions {
        if let Some(filter) = RepositoryFilter::parse(expression.as_ref())? {
            filters.push(filter);
        }
    }
    Ok(filters)
}

/// Keep the repositories matching every filter, preserving order.
pub fn apply_filters(
    repositories: Vec<RepositoryRecord>,
    filters: &[RepositoryFilter],
) -> Vec<RepositoryRecord> {
    repositories
        .into_iter()
        .filter(|repo| filters.iter().all(|f| f.matches(repo)))
        .collect()
}
