//! Root domain extraction for drift comparison.

/// Reduces a host name to its last two dot-separated labels.
///
/// Structural only: labels are not validated and public suffixes such as
/// `co.uk` are not special-cased. A host with fewer than two labels is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use multisite_domain_sync::utils::root_domain::root_domain;
///
/// assert_eq!(root_domain("www.staging.example.com"), "example.com");
/// assert_eq!(root_domain("localhost"), "localhost");
/// ```
pub fn root_domain(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    let start = labels.len().saturating_sub(2);
    labels[start..].join(".")
}

/// Compares the root domains of two hosts, ignoring ASCII case.
pub fn same_root(a: &str, b: &str) -> bool {
    root_domain(a).eq_ignore_ascii_case(&root_domain(b))
}
