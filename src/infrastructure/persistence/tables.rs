//! Table name resolution for the multisite schema.
//!
//! Table names cannot be bound as query parameters, so they are built from
//! a prefix that is validated once up front.

use crate::domain::entities::OptionScope;
use crate::error::AppError;
use serde_json::json;

/// Blog id of the network's main site, whose options live in the unsuffixed table.
pub const MAIN_BLOG_ID: i64 = 1;

/// Default table prefix of the platform.
pub const DEFAULT_TABLE_PREFIX: &str = "wp_";

/// Resolves physical table names from a validated prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    prefix: String,
}

impl TableNames {
    /// Creates table names for `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] unless the prefix is non-empty and
    /// consists only of ASCII letters, digits and underscores.
    pub fn new(prefix: &str) -> Result<Self, AppError> {
        if !is_valid_prefix(prefix) {
            return Err(AppError::configuration(
                "Invalid table prefix",
                json!({ "prefix": prefix, "allowed": "A-Z, a-z, 0-9, _" }),
            ));
        }

        Ok(Self {
            prefix: prefix.to_string(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn site(&self) -> String {
        format!("{}site", self.prefix)
    }

    pub fn blogs(&self) -> String {
        format!("{}blogs", self.prefix)
    }

    pub fn sitemeta(&self) -> String {
        format!("{}sitemeta", self.prefix)
    }

    /// Option table for a scope.
    ///
    /// The network and the main site share `{prefix}options`; every other
    /// tenant has `{prefix}{blog_id}_options`.
    pub fn options(&self, scope: OptionScope) -> String {
        match scope {
            OptionScope::Network => format!("{}options", self.prefix),
            OptionScope::Site(id) if id == MAIN_BLOG_ID => format!("{}options", self.prefix),
            OptionScope::Site(id) => format!("{}{}_options", self.prefix, id),
        }
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_TABLE_PREFIX.to_string(),
        }
    }
}

pub fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty()
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
