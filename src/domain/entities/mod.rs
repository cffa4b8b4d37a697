//! Records the migration engine reads and rewrites.
//!
//! All of them are owned by the platform's storage; the engine never
//! creates or deletes rows, it only rewrites values in place.
//!
//! # Entity Types
//!
//! - [`NetworkConfig`] - The root network row
//! - [`SiteRecord`] - One tenant site
//! - [`OptionScope`] - Addresses the network or a tenant option set

pub mod network;
pub mod option;
pub mod site;

pub use network::{META_SITEURL, NetworkConfig};
pub use option::{OPTION_ADMIN_EMAIL, OPTION_HOME, OPTION_SITEURL, OptionScope};
pub use site::SiteRecord;
