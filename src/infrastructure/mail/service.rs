//! Notifier trait.

use crate::domain::notification::OutgoingMail;
use crate::error::AppError;
use async_trait::async_trait;

/// Delivers one outgoing message.
///
/// Callers treat delivery as best-effort: an error is logged and dropped,
/// never propagated out of a migration run.
///
/// # Implementations
///
/// - [`crate::infrastructure::mail::SendmailNotifier`] - Pipes the message into a local `sendmail`
/// - [`crate::infrastructure::mail::LogNotifier`] - Logs the message instead of sending it
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `mail`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Notification`] if the message could not be handed off.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), AppError>;
}
