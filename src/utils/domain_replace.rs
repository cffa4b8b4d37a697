//! Case-insensitive domain substitution.

use regex::{NoExpand, Regex, RegexBuilder};
use std::borrow::Cow;

/// Replaces one domain with another inside arbitrary strings.
///
/// Matching ignores case, non-matching characters keep their original case,
/// and **every** occurrence is replaced, not only a trailing suffix. A
/// tenant domain `example.com.example.com` therefore has both occurrences
/// rewritten, and an old domain that happens to appear inside an unrelated
/// path segment is rewritten too.
#[derive(Debug, Clone)]
pub struct DomainReplacer {
    pattern: Regex,
    replacement: String,
}

impl DomainReplacer {
    /// Builds a replacer for `from` → `to`.
    ///
    /// `from` is matched literally; regex metacharacters such as `.` are escaped.
    /// Case folding is ASCII-only, as for host names.
    pub fn new(from: &str, to: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&regex::escape(from))
            .case_insensitive(true)
            .unicode(false)
            .build()?;

        Ok(Self {
            pattern,
            replacement: to.to_string(),
        })
    }

    /// Applies the substitution to `input`.
    ///
    /// Borrows the input when nothing matched.
    pub fn replace<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if self.pattern.as_str().is_empty() {
            return Cow::Borrowed(input);
        }
        self.pattern
            .replace_all(input, NoExpand(self.replacement.as_str()))
    }

    /// Returns true if `input` contains the domain being replaced.
    pub fn matches(&self, input: &str) -> bool {
        !self.pattern.as_str().is_empty() && self.pattern.is_match(input)
    }
}

/// Strips a leading `www.` label, ignoring case.
pub fn strip_www(domain: &str) -> &str {
    match domain.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &domain[4..],
        _ => domain,
    }
}
