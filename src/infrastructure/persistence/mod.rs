//! MySQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! runtime queries. Table names depend on the configured prefix, so queries
//! are assembled with [`TableNames`] rather than checked at compile time.
//!
//! # Repositories
//!
//! - [`MySqlNetworkRepository`] - Network row, tenant sites and network meta
//! - [`MySqlOptionRepository`] - Network and tenant option sets

pub mod mysql_network_repository;
pub mod mysql_option_repository;
pub mod tables;

pub use mysql_network_repository::MySqlNetworkRepository;
pub use mysql_option_repository::MySqlOptionRepository;
pub use tables::{DEFAULT_TABLE_PREFIX, MAIN_BLOG_ID, TableNames};
