//! Domain extraction and matching for the exclusion list.

use std::collections::HashSet;
use url::Url;

/// Extracts the lowercase host from an absolute URL.
///
/// Returns `None` for relative or unparseable URLs and for URLs without a
/// host (e.g. `mailto:`). IPv6 hosts keep their brackets.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_host("https://Docs.Example.com:8443/a"), Some("docs.example.com".into()));
/// assert_eq!(extract_host("/relative/path"), None);
/// ```
pub fn extract_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(|host| host.to_ascii_lowercase())
}

/// Normalizes a configured domain for matching.
///
/// Trims whitespace, lowercases, and drops a leading `*.` or `.` so
/// `*.example.com`, `.example.com` and `example.com` are equivalent.
/// Returns `None` for entries that are empty after trimming.
pub fn normalize_domain(domain: &str) -> Option<String> {
    let trimmed = domain.trim();
    let trimmed = trimmed
        .strip_prefix("*.")
        .or_else(|| trimmed.strip_prefix('.'))
        .unwrap_or(trimmed);

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_lowercase())
    }
}

/// Checks whether `host` equals or is a subdomain of any excluded domain.
///
/// `excluded` must already be normalized with [`normalize_domain`].
pub fn is_excluded_host(host: &str, excluded: &HashSet<String>) -> bool {
    if excluded.is_empty() {
        return false;
    }

    if excluded.contains(host) {
        return true;
    }

    host.match_indices('.')
        .any(|(dot, _)| excluded.contains(&host[dot + 1..]))
}

/// Checks whether the host of `url` is excluded.
///
/// URLs without a parseable host are never excluded.
pub fn is_excluded_url(url: &str, excluded: &HashSet<String>) -> bool {
    if excluded.is_empty() {
        return false;
    }

    extract_host(url).is_some_and(|host| is_excluded_host(&host, excluded))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excluded(domains: &[&str]) -> HashSet<String> {
        domains.iter().filter_map(|d| normalize_domain(d)).collect()
    }

    #[test]
    fn test_extract_host_simple() {
        assert_eq!(
            extract_host("https://example.com/page"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_host_strips_port_and_case() {
        assert_eq!(
            extract_host("http://Internal.Example.COM:8080/x?y=1"),
            Some("internal.example.com".to_string())
        );
    }

    #[test]
    fn test_extract_host_ipv6() {
        assert_eq!(
            extract_host("http://[::1]:3000/"),
            Some("[::1]".to_string())
        );
    }

    #[test]
    fn test_extract_host_relative_or_hostless() {
        assert_eq!(extract_host("/about"), None);
        assert_eq!(extract_host("mailto:someone@example.com"), None);
        assert_eq!(extract_host(""), None);
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(
            normalize_domain("  Example.COM "),
            Some("example.com".to_string())
        );
        assert_eq!(
            normalize_domain("*.example.com"),
            Some("example.com".to_string())
        );
        assert_eq!(
            normalize_domain(".example.com"),
            Some("example.com".to_string())
        );
        assert_eq!(normalize_domain("   "), None);
    }

    #[test]
    fn test_is_excluded_exact_and_subdomain() {
        let list = excluded(&["internal.example.com"]);

        assert!(is_excluded_host("internal.example.com", &list));
        assert!(is_excluded_host("api.internal.example.com", &list));
        assert!(!is_excluded_host("example.com", &list));
        assert!(!is_excluded_host("notinternal.example.com", &list));
    }

    #[test]
    fn test_is_excluded_url() {
        let list = excluded(&["internal.example.com"]);

        assert!(is_excluded_url("https://internal.example.com/admin", &list));
        assert!(!is_excluded_url("https://github.com", &list));
        assert!(!is_excluded_url("not a url", &list));
    }

    #[test]
    fn test_empty_exclusion_list_excludes_nothing() {
        let list = HashSet::new();
        assert!(!is_excluded_url("https://internal.example.com", &list));
    }
}
