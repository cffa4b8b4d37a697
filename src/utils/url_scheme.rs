//! URL scheme enforcement for rewritten site URLs.
//!
//! The enforcer is fail-open: a URL it cannot make sense of is returned
//! verbatim so that one malformed option never aborts a migration.

use std::fmt;
use std::str::FromStr;
use url::Url;

/// Errors that can occur when parsing a configured URL scheme.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlSchemeError {
    #[error("Unsupported URL scheme '{0}', expected 'http' or 'https'")]
    Unsupported(String),
}

/// A scheme that rewritten URLs are forced onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlScheme {
    Http,
    Https,
}

impl UrlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlScheme::Http => "http",
            UrlScheme::Https => "https",
        }
    }

    /// Parses an optional scheme setting.
    ///
    /// Empty or whitespace-only input means "keep each URL's own scheme"
    /// and yields `Ok(None)`.
    pub fn parse_optional(input: &str) -> Result<Option<Self>, UrlSchemeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl FromStr for UrlScheme {
    type Err = UrlSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(UrlScheme::Http),
            "https" => Ok(UrlScheme::Https),
            _ => Err(UrlSchemeError::Unsupported(s.to_string())),
        }
    }
}

impl fmt::Display for UrlScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks whether a URL is well-formed enough to have its scheme rewritten.
///
/// Accepts absolute URLs with a host, and bare `host/path` forms that
/// become absolute once `http://` is prepended.
pub fn is_well_formed(input: &str) -> bool {
    if input.trim().is_empty() || input.chars().any(char::is_whitespace) {
        return false;
    }

    if let Ok(url) = Url::parse(input)
        && url.has_host()
    {
        return true;
    }

    if input.contains("://") {
        return false;
    }

    Url::parse(&format!("http://{input}")).is_ok_and(|url| url.has_host())
}

/// Rewrites the protocol prefix of `url` to `scheme`.
///
/// # Rules
///
/// 1. No scheme requested, or a malformed URL: returned unchanged
/// 2. No `//` separator: `scheme://` is prepended to the whole string
/// 3. Otherwise the URL is split on the **first** `//`; the prefix becomes
///    `scheme:` and the remainder is kept verbatim, including any `//`
///    inside the path
///
/// # Examples
///
/// ```
/// use multisite_domain_sync::utils::url_scheme::{UrlScheme, enforce_scheme};
///
/// assert_eq!(
///     enforce_scheme(Some(UrlScheme::Https), "http://a.com/path//x"),
///     "https://a.com/path//x"
/// );
/// assert_eq!(enforce_scheme(None, "http://a.com"), "http://a.com");
/// assert_eq!(enforce_scheme(Some(UrlScheme::Https), "a.com"), "https://a.com");
/// ```
pub fn enforce_scheme(scheme: Option<UrlScheme>, url: &str) -> String {
    let Some(scheme) = scheme else {
        return url.to_string();
    };

    if !is_well_formed(url) {
        tracing::debug!(url, "URL failed validation, leaving scheme untouched");
        return url.to_string();
    }

    match url.split_once("//") {
        Some((_, rest)) => format!("{scheme}://{rest}"),
        None => format!("{scheme}://{url}"),
    }
}

/// Returns the scheme of an absolute URL, if it has one.
pub fn scheme_of(url: &str) -> Option<UrlScheme> {
    Url::parse(url).ok().and_then(|u| u.scheme().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enforce_https_on_http_url() {
        assert_eq!(
            enforce_scheme(Some(UrlScheme::Https), "http://a.com"),
            "https://a.com"
        );
    }

    #[test]
    fn test_enforce_keeps_double_slash_in_path() {
        assert_eq!(
            enforce_scheme(Some(UrlScheme::Https), "http://a.com/path//x"),
            "https://a.com/path//x"
        );
    }

    #[test]
    fn test_enforce_http_on_https_url() {
        assert_eq!(
            enforce_scheme(Some(UrlScheme::Http), "https://example.local/blog/"),
            "http://example.local/blog/"
        );
    }

    #[test]
    fn test_no_scheme_is_noop() {
        assert_eq!(enforce_scheme(None, "http://a.com"), "http://a.com");
    }

    #[test]
    fn test_missing_separator_is_synthesized() {
        assert_eq!(
            enforce_scheme(Some(UrlScheme::Https), "a.com"),
            "https://a.com"
        );
        assert_eq!(
            enforce_scheme(Some(UrlScheme::Http), "a.com/blog"),
            "http://a.com/blog"
        );
    }

    #[test]
    fn test_malformed_url_passes_through() {
        assert_eq!(
            enforce_scheme(Some(UrlScheme::Https), "not a url"),
            "not a url"
        );
        assert_eq!(enforce_scheme(Some(UrlScheme::Https), ""), "");
        assert_eq!(
            enforce_scheme(Some(UrlScheme::Https), "http://"),
            "http://"
        );
    }

    #[test]
    fn test_port_and_query_preserved() {
        assert_eq!(
            enforce_scheme(Some(UrlScheme::Https), "http://a.com:8080/x?y=1"),
            "https://a.com:8080/x?y=1"
        );
    }

    #[test]
    fn test_parse_scheme() {
        assert_eq!("https".parse::<UrlScheme>(), Ok(UrlScheme::Https));
        assert_eq!("HTTP".parse::<UrlScheme>(), Ok(UrlScheme::Http));
        assert!("ftp".parse::<UrlScheme>().is_err());
    }

    #[test]
    fn test_parse_optional_empty() {
        assert_eq!(UrlScheme::parse_optional(""), Ok(None));
        assert_eq!(UrlScheme::parse_optional("  "), Ok(None));
        assert_eq!(
            UrlScheme::parse_optional("https"),
            Ok(Some(UrlScheme::Https))
        );
    }

    #[test]
    fn test_scheme_of() {
        assert_eq!(scheme_of("https://a.com/"), Some(UrlScheme::Https));
        assert_eq!(scheme_of("http://a.com"), Some(UrlScheme::Http));
        assert_eq!(scheme_of("ftp://a.com"), None);
        assert_eq!(scheme_of("a.com"), None);
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("http://a.com"));
        assert!(is_well_formed("a.com"));
        assert!(!is_well_formed("http://"));
        assert!(!is_well_formed("with space.com"));
    }
}
