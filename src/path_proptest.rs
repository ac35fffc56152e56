//! Property-based tests for URL and path helpers.
//!
//! These tests use proptest to generate repository URLs and verify that the
//! derived names and path filters hold for every generated input.

#[cfg(test)]
mod proptest_tests {
    use crate::discovery::RepositoryRecord;
    use crate::filter::RepositoryFilter;
    use crate::path::{project_path, repository_name};
    use proptest::prelude::*;

    // ============================================================================
    // repository_name property tests
    // ============================================================================

    proptest! {
        /// Property: the local name is the last segment of an HTTPS URL
        #[test]
        fn repository_name_is_last_https_segment(
            group in "[a-z][a-z0-9-]{0,12}",
            repo in "[a-z][a-z0-9_-]{0,12}",
        ) {
            let url = format!("https://gitlab.com/{}/{}.git", group, repo);
            prop_assert_eq!(repository_name(&url), Some(format!("{}.git", repo)));
        }

        /// Property: SSH and HTTPS URLs of the same project share a local name
        #[test]
        fn repository_name_agrees_for_ssh_and_https(
            group in "[a-z][a-z0-9-]{0,12}",
            repo in "[a-z][a-z0-9_-]{0,12}",
        ) {
            let https = format!("https://gitlab.com/{}/{}.git", group, repo);
            let ssh = format!("git@gitlab.com:{}/{}.git", group, repo);
            prop_assert_eq!(repository_name(&https), repository_name(&ssh));
        }

        /// Property: the local name never contains a path separator
        #[test]
        fn repository_name_has_no_separators(url in ".*") {
            if let Some(name) = repository_name(&url) {
                prop_assert!(!name.contains('/'));
                prop_assert!(!name.contains(':'));
                prop_assert!(!name.is_empty());
            }
        }

        /// Property: trailing slashes do not change the local name
        #[test]
        fn repository_name_ignores_trailing_slashes(
            repo in "[a-z][a-z0-9_-]{0,12}",
            slashes in "/{1,3}",
        ) {
            let url = format!("https://gitlab.com/acme/{}", repo);
            let with_slashes = format!("{}{}", url, slashes);
            prop_assert_eq!(repository_name(&url), repository_name(&with_slashes));
        }
    }

    // ============================================================================
    // project_path property tests
    // ============================================================================

    proptest! {
        /// Property: project path round-trips the namespace of SSH and HTTPS URLs
        #[test]
        fn project_path_recovers_namespace(
            group in "[a-z][a-z0-9-]{0,12}",
            repo in "[a-z][a-z0-9_-]{0,12}",
        ) {
            let expected = format!("{}/{}", group, repo);
            let https = format!("https://gitlab.com/{}.git", expected);
            let ssh = format!("git@gitlab.com:{}.git", expected);
            prop_assert_eq!(project_path(&https), Some(expected.clone()));
            prop_assert_eq!(project_path(&ssh), Some(expected));
        }
    }

    // ============================================================================
    // path filter property tests
    // ============================================================================

    fn record(path: &str) -> RepositoryRecord {
        RepositoryRecord {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path_with_namespace: path.to_string(),
            url: format!("https://gitlab.com/{}", path),
            clone_url_ssh: format!("git@gitlab.com:{}.git", path),
            clone_url_http: format!("https://gitlab.com/{}.git", path),
            default_branch: "main".to_string(),
            topics: Vec::new(),
        }
    }

    fn path_filter(pattern: &str) -> RepositoryFilter {
        RepositoryFilter::parse(&format!("path:{}", pattern))
            .unwrap()
            .unwrap()
    }

    proptest! {
        /// Property: `path:*needle*` keeps every path containing the needle
        #[test]
        fn path_filter_contains_pattern_matches(
            prefix in "[a-z/]{0,10}",
            needle in "[a-z]{1,6}",
            suffix in "[a-z/]{0,10}",
        ) {
            let path = format!("{}{}{}", prefix, needle, suffix);
            let filter = path_filter(&format!("*{}*", needle));
            prop_assert!(filter.matches(&record(&path)));
        }

        /// Property: a literal pattern matches only its own path
        #[test]
        fn path_filter_literal_matches_only_itself(
            a in "[a-z]{1,8}/[a-z]{1,8}",
            b in "[a-z]{1,8}/[a-z]{1,8}",
        ) {
            prop_assert!(path_filter(&a).matches(&record(&a)));
            prop_assert_eq!(path_filter(&a).matches(&record(&b)), a == b);
        }
    }
}
