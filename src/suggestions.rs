//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use patchbot::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Discovery file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::discovery_file_not_found(path));
//! ```

use std::path::Path;

/// Error for a patch command without a repository URL.
pub fn missing_repository_url() -> anyhow::Error {
    anyhow::anyhow!(
        "Missing arguments: a repository URL is required\n\n\
         hint: Pass --repository-url git@gitlab.com:group/repo.git\n\
         hint: Use batch-patch to patch every repository of a discovery file"
    )
}

/// Error for a batch command whose discovery file does not exist.
pub fn discovery_file_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Discovery file not found: {path}\n\n\
         hint: Run 'patchbot discover <namespace>' to create it\n\
         hint: Use -f/--file to read a different file\n\
         hint: Set PATCHBOT_DISCOVERY_FILE environment variable",
        path = path.display()
    )
}

/// Error for a GitLab call without an access token.
pub fn missing_token() -> anyhow::Error {
    anyhow::anyhow!(
        "A GitLab access token is required\n\n\
         hint: Pass --token <TOKEN>\n\
         hint: Set PATCHBOT_GITLAB_TOKEN environment variable\n\
         hint: The token needs the read_api scope (api to open merge requests)"
    )
}

/// Error for `--create-mr` on a URL without a namespaced project path.
pub fn merge_request_project_unknown(url: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Cannot open a merge request for {url}: no project path in the URL\n\n\
         hint: Use a hosted URL such as git@gitlab.com:group/repo.git"
    )
}

/// Error for an unknown patch name, suggesting close matches.
pub fn patch_not_found(name: &str, source_dir: &Path, available: &[String]) -> anyhow::Error {
    let candidates: Vec<&str> = available.iter().map(String::as_str).collect();
    let did_you_mean = find_similar(name, &candidates)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();
    let listing = if available.is_empty() {
        "No patches found there".to_string()
    } else {
        format!("Available patches: {}", available.join(", "))
    };

    anyhow::anyhow!(
        "Patch '{name}' not found in {dir}{did_you_mean}\n\n\
         {listing}\n\
         hint: Create one with 'patchbot create {name}'\n\
         hint: Use -s/--patch-source-directory to look elsewhere",
        dir = source_dir.display()
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Two-row variant: only the previous row is needed
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
