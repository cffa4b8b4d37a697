//! URL option sets stored per tenant and for the network.

use std::fmt;

/// Option holding the public URL of a site.
pub const OPTION_HOME: &str = "home";
/// Option holding the install URL of a site.
pub const OPTION_SITEURL: &str = "siteurl";
/// Option holding the network administrator's email address.
pub const OPTION_ADMIN_EMAIL: &str = "admin_email";

/// Which option set an option key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionScope {
    /// Network-wide options (the main site's option set).
    Network,
    /// Options of one tenant, by blog id.
    Site(i64),
}

impl fmt::Display for OptionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionScope::Network => f.write_str("network"),
            OptionScope::Site(id) => write!(f, "site:{id}"),
        }
    }
}
