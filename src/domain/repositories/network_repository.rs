//! Repository trait for network and tenant site records.

use crate::domain::entities::{NetworkConfig, SiteRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the network row, its tenants and its meta.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MySqlNetworkRepository`] - MySQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mysql.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkRepository: Send + Sync {
    /// Finds the root network row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_network(&self, network_id: i64) -> Result<Option<NetworkConfig>, AppError>;

    /// Lists every tenant site of the network, ordered by blog id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn list_sites(&self, network_id: i64) -> Result<Vec<SiteRecord>, AppError>;

    /// Overwrites the domain of one tenant site.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the site does not exist or on database errors.
    async fn update_site_domain(&self, blog_id: i64, domain: &str) -> Result<(), AppError>;

    /// Overwrites the domain of the network row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the network does not exist or on database errors.
    async fn update_network_domain(&self, network_id: i64, domain: &str) -> Result<(), AppError>;

    /// Overwrites a network meta value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn update_network_meta(
        &self,
        network_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), AppError>;
}
