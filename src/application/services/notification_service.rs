//! Post-migration notification dispatch.

use crate::domain::entities::{OPTION_ADMIN_EMAIL, OptionScope};
use crate::domain::migration::{DomainChange, RewriteReport};
use crate::domain::notification::{NotificationSpec, OutgoingMail};
use crate::domain::repositories::OptionRepository;
use crate::infrastructure::mail::Notifier;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use validator::ValidateEmail;

/// Name reported in notification bodies.
pub const ENGINE_NAME: &str = env!("CARGO_PKG_NAME");
/// Version reported in notification bodies.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends the best-effort "domain updated" message after a migration.
///
/// Never fails: a missing destination or a delivery error is logged and
/// the migration result stands.
pub struct NotificationService<O: OptionRepository> {
    option_repository: Arc<O>,
    notifier: Arc<dyn Notifier>,
}

impl<O: OptionRepository> NotificationService<O> {
    /// Creates a new notification service.
    pub fn new(option_repository: Arc<O>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            option_repository,
            notifier,
        }
    }

    /// Resolves and sends the notification for a completed migration.
    ///
    /// Returns the message that was handed to the notifier, or `None` when
    /// notifications are disabled or no destination could be resolved.
    /// A message is returned even when delivery itself failed.
    pub async fn dispatch(
        &self,
        spec: &NotificationSpec,
        change: &DomainChange,
        report: &RewriteReport,
    ) -> Option<OutgoingMail> {
        if !spec.is_enabled() {
            return None;
        }

        let admin_email = match self
            .option_repository
            .get_option(OptionScope::Network, OPTION_ADMIN_EMAIL)
            .await
        {
            Ok(email) => email,
            Err(e) => {
                warn!(error = %e, "Failed to read admin email for notification");
                None
            }
        };

        let Some(mail) = resolve_mail(spec, admin_email.as_deref(), change, report) else {
            warn!("Notification enabled but no destination address available");
            metrics::counter!("domain_sync_notifications_total", "outcome" => "no_destination")
                .increment(1);
            return None;
        };

        match self.notifier.send(&mail).await {
            Ok(()) => {
                info!(to = %mail.to, "Migration notification sent");
                metrics::counter!("domain_sync_notifications_total", "outcome" => "sent")
                    .increment(1);
            }
            Err(e) => {
                warn!(to = %mail.to, error = %e, "Migration notification failed");
                metrics::counter!("domain_sync_notifications_total", "outcome" => "failed")
                    .increment(1);
            }
        }

        Some(mail)
    }
}

/// Builds the outgoing message from the notification settings and defaults.
///
/// # Field Resolution
///
/// - `to`: a valid override address, otherwise the network admin email
/// - `subject`: override, otherwise [`default_subject`]
/// - `body`: override, otherwise [`default_body`]
///
/// Returns `None` when notifications are disabled or no destination remains.
pub fn resolve_mail(
    spec: &NotificationSpec,
    admin_email: Option<&str>,
    change: &DomainChange,
    report: &RewriteReport,
) -> Option<OutgoingMail> {
    let (to, subject, body) = match spec {
        NotificationSpec::Disabled => return None,
        NotificationSpec::Enabled => (None, None, None),
        NotificationSpec::Recipient(address) => (Some(address.as_str()), None, None),
        NotificationSpec::Custom(overrides) => (
            overrides.to.as_deref(),
            overrides.subject.clone(),
            overrides.body.clone(),
        ),
    };

    let to = match to.map(str::trim) {
        Some(address) if address.to_string().validate_email() => address.to_string(),
        Some(address) => {
            warn!(address, "Notification address is not a valid email, using admin email");
            default_destination(admin_email)?
        }
        None => default_destination(admin_email)?,
    };

    Some(OutgoingMail {
        to,
        subject: subject.unwrap_or_else(|| default_subject(change)),
        body: body.unwrap_or_else(|| default_body(change, report)),
    })
}

fn default_destination(admin_email: Option<&str>) -> Option<String> {
    admin_email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
}

pub fn default_subject(change: &DomainChange) -> String {
    format!("[{}] Network domain updated", change.target_domain)
}

pub fn default_body(change: &DomainChange, report: &RewriteReport) -> String {
    let mut body = format!(
        "{ENGINE_NAME} v{ENGINE_VERSION} updated the network domain.\n\n\
         Old domain:          {}\n\
         New domain:          {}\n\
         Network URL:         {}\n\
         Sites rewritten:     {}\n\
         Site URLs rewritten: {}\n",
        change.old_root,
        change.target_domain,
        report.network_url,
        report.sites_rewritten,
        report.site_urls_rewritten,
    );

    if !report.sites_skipped.is_empty() {
        let skipped: Vec<String> = report.sites_skipped.iter().map(i64::to_string).collect();
        body.push_str(&format!(
            "Sites without siteurl: {}\n",
            skipped.join(", ")
        ));
    }

    body.push_str(&format!("Completed at:        {}\n", Utc::now().to_rfc3339()));
    body
}
