//! Notifier that only logs.

use super::service::Notifier;
use crate::domain::notification::OutgoingMail;
use crate::error::AppError;
use async_trait::async_trait;
use tracing::{debug, info};

/// A notifier that writes the message to the log instead of sending it.
///
/// # Use Cases
///
/// - Local environments without a mail transport
/// - Fallback when no `sendmail` binary is configured
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        debug!("Using LogNotifier (mail delivery disabled)");
        Self
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), AppError> {
        info!(
            to = %mail.to,
            subject = %mail.subject,
            body = %mail.body,
            "Notification (not delivered)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let notifier = LogNotifier::new();
        let mail = OutgoingMail {
            to: "admin@example.local".to_string(),
            subject: "Subject".to_string(),
            body: "Body".to_string(),
        };

        assert!(notifier.send(&mail).await.is_ok());
    }
}
