//! Delivery through a local `sendmail`-compatible binary.

use super::service::Notifier;
use crate::domain::notification::OutgoingMail;
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::json;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default location of the sendmail binary.
pub const DEFAULT_SENDMAIL_PATH: &str = "/usr/sbin/sendmail";

/// Hands messages to `sendmail -t -i`, which reads recipients from the headers.
pub struct SendmailNotifier {
    sendmail_path: String,
    from: Option<String>,
}

impl SendmailNotifier {
    pub fn new(sendmail_path: impl Into<String>, from: Option<String>) -> Self {
        Self {
            sendmail_path: sendmail_path.into(),
            from,
        }
    }
}

#[async_trait]
impl Notifier for SendmailNotifier {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), AppError> {
        let message = render_message(self.from.as_deref(), mail);

        let mut child = Command::new(&self.sendmail_path)
            .arg("-t")
            .arg("-i")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                AppError::notification(
                    "Failed to start sendmail",
                    json!({ "path": self.sendmail_path, "error": e.to_string() }),
                )
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(message.as_bytes()).await.map_err(|e| {
                AppError::notification(
                    "Failed to write message to sendmail",
                    json!({ "error": e.to_string() }),
                )
            })?;
        }

        let output = child.wait_with_output().await.map_err(|e| {
            AppError::notification(
                "Failed to wait for sendmail",
                json!({ "error": e.to_string() }),
            )
        })?;

        if !output.status.success() {
            return Err(AppError::notification(
                "sendmail exited with an error",
                json!({
                    "status": output.status.code(),
                    "stderr": String::from_utf8_lossy(&output.stderr),
                }),
            ));
        }

        tracing::debug!(to = %mail.to, "Notification handed to sendmail");
        Ok(())
    }
}

/// Renders a plain-text message with the headers `sendmail -t` expects.
///
/// Header values have CR/LF collapsed to spaces so a configured subject
/// cannot inject extra headers.
pub fn render_message(from: Option<&str>, mail: &OutgoingMail) -> String {
    let mut message = String::new();

    message.push_str(&format!("To: {}\r\n", header_value(&mail.to)));
    if let Some(from) = from {
        message.push_str(&format!("From: {}\r\n", header_value(from)));
    }
    message.push_str(&format!("Subject: {}\r\n", header_value(&mail.subject)));
    message.push_str("MIME-Version: 1.0\r\n");
    message.push_str("Content-Type: text/plain; charset=UTF-8\r\n");
    message.push_str("\r\n");
    message.push_str(&mail.body);
    if !mail.body.ends_with('\n') {
        message.push_str("\r\n");
    }

    message
}

fn header_value(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
