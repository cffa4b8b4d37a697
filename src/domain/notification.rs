//! Post-migration notification model.

use serde::Deserialize;

/// Per-field overrides for the notification message.
///
/// Any field left as `None` falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationOverrides {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

impl NotificationOverrides {
    pub fn is_empty(&self) -> bool {
        self.to.is_none() && self.subject.is_none() && self.body.is_none()
    }
}

/// Whether, and how, to notify after a successful migration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotificationSpec {
    #[default]
    Disabled,
    /// Send with all defaults.
    Enabled,
    /// Bare address; used as the destination when it is a valid email.
    Recipient(String),
    Custom(NotificationOverrides),
}

impl NotificationSpec {
    /// Parses the raw configuration value.
    ///
    /// - empty, `false`, `0`, `no`, `off` → [`NotificationSpec::Disabled`]
    /// - `true`, `1`, `yes`, `on` → [`NotificationSpec::Enabled`]
    /// - a JSON object → [`NotificationSpec::Custom`], or
    ///   [`NotificationSpec::Disabled`] when it sets no field
    /// - anything else → [`NotificationSpec::Recipient`]
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the value looks like an object but does
    /// not parse as one.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value = raw.trim();

        if value.starts_with('{') {
            let overrides: NotificationOverrides = serde_json::from_str(value)?;
            if overrides.is_empty() {
                return Ok(NotificationSpec::Disabled);
            }
            return Ok(NotificationSpec::Custom(overrides));
        }

        let spec = match value.to_ascii_lowercase().as_str() {
            "" | "false" | "0" | "no" | "off" => NotificationSpec::Disabled,
            "true" | "1" | "yes" | "on" => NotificationSpec::Enabled,
            _ => NotificationSpec::Recipient(value.to_string()),
        };

        Ok(spec)
    }

    /// An override map that sets no field counts as disabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            NotificationSpec::Disabled => false,
            NotificationSpec::Custom(overrides) => !overrides.is_empty(),
            NotificationSpec::Enabled | NotificationSpec::Recipient(_) => true,
        }
    }
}

/// A fully resolved message ready for a [`crate::infrastructure::mail::Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}
