//! URL handling module for Contact-Harvester
//!
//! This module provides href resolution against a page URL, the
//! normalization used to key a crawl's visited set, and host extraction.

mod normalize;

use ::url::Url;

pub use normalize::normalize_url;

/// Resolves a raw `href` attribute against the page it was found on
///
/// Surrounding whitespace is ignored. Returns `None` for empty hrefs and for
/// hrefs the URL parser rejects relative to `base`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use contact_harvester::url::resolve_href;
///
/// let base = Url::parse("https://example.com/team/").unwrap();
/// let resolved = resolve_href(&base, "../contact").unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/contact");
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok()
}

/// Extracts the lowercase host of a URL, if it has one
///
/// ```
/// use url::Url;
/// use contact_harvester::url::extract_domain;
///
/// let url = Url::parse("https://WWW.LinkedIn.com/in/someone").unwrap();
/// assert_eq!(extract_domain(&url), Some("www.linkedin.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/about/team").unwrap()
    }

    #[test]
    fn test_resolve_relative_against_page() {
        let resolved = resolve_href(&base(), "people").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/about/people");
    }

    #[test]
    fn test_resolve_root_relative() {
        let resolved = resolve_href(&base(), "/contact").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/contact");
    }

    #[test]
    fn test_resolve_absolute_ignores_base() {
        let resolved = resolve_href(&base(), "https://other.org/x").unwrap();
        assert_eq!(resolved.as_str(), "https://other.org/x");
    }

    #[test]
    fn test_resolve_keeps_non_http_schemes() {
        let resolved = resolve_href(&base(), "mailto:info@example.com").unwrap();
        assert_eq!(resolved.scheme(), "mailto");
    }

    #[test]
    fn test_resolve_empty_href() {
        assert!(resolve_href(&base(), "   ").is_none());
    }

    #[test]
    fn test_resolve_unparseable_href() {
        assert!(resolve_href(&base(), "http://[::1").is_none());
    }

    #[test]
    fn test_extract_domain_with_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_extract_domain_missing_host() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(extract_domain(&url), None);
    }
}
