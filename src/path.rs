//! Path and URL helpers for patchbot

/// Local directory name of a repository, derived from its URL.
///
/// This is the last path segment of the URL, after splitting on `/` and `:`
/// so that scp-like SSH URLs (`git@host:group/repo.git`) work too. Trailing
/// slashes are ignored. The `.git` suffix is kept, so a URL ending in
/// `repo.git` is checked out into `repo.git/`.
///
/// Returns `None` when the URL has no usable segment.
pub fn repository_name(url: &str) -> Option<String> {
    url.trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
}

/// Namespaced project path of a hosted repository URL, e.g. `group/sub/repo`.
///
/// Supports `https://host/group/repo.git` and `git@host:group/repo.git`.
/// The `.git` suffix is stripped. Returns `None` for local paths and URLs
/// without a namespace.
pub fn project_path(url: &str) -> Option<String> {
    let rest = if let Some((_, after_scheme)) = url.split_once("://") {
        after_scheme.split_once('/').map(|(_, path)| path)?
    } else if let Some((host, path)) = url.split_once(':') {
        if host.contains('/') {
            return None;
        }
        path
    } else {
        return None;
    };

    let trimmed = rest.trim_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    if trimmed.contains('/') {
        Some(trimmed.to_string())
    } else {
        None
    }
}
