//! Repository trait for network and tenant option sets.

use crate::domain::entities::OptionScope;
use crate::error::AppError;
use async_trait::async_trait;

/// Key/value access to `home`, `siteurl`, `admin_email` and friends.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MySqlOptionRepository`] - MySQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OptionRepository: Send + Sync {
    /// Reads one option value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the option exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn get_option(&self, scope: OptionScope, key: &str) -> Result<Option<String>, AppError>;

    /// Writes one option value, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn set_option(&self, scope: OptionScope, key: &str, value: &str)
    -> Result<(), AppError>;
}
