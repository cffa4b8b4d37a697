//! Outgoing notification delivery.
//!
//! Provides a [`Notifier`] trait with two implementations:
//! - [`SendmailNotifier`] - Delivers through a local `sendmail` binary
//! - [`LogNotifier`] - Logs instead of sending

mod log_notifier;
mod sendmail_notifier;
mod service;

pub use log_notifier::LogNotifier;
pub use sendmail_notifier::{DEFAULT_SENDMAIL_PATH, SendmailNotifier, render_message};
pub use service::Notifier;

#[cfg(test)]
pub use service::MockNotifier;
