//! Migration inputs, detector decisions and run reports.
//!
//! # Run Flow
//!
//! 1. [`MigrationConfig`] is built by the host (see [`crate::config`])
//! 2. The drift detector turns it into a [`DriftDecision`]
//! 3. On [`DriftDecision::Required`] the rewrite service applies the
//!    [`DomainChange`] and returns a [`RewriteReport`]
//! 4. The outcome of the whole run is a [`MigrationOutcome`]

use crate::domain::notification::NotificationSpec;
use crate::utils::url_scheme::UrlScheme;

/// Explicit engine configuration, read once at run start.
#[derive(Debug, Clone, Default)]
pub struct MigrationConfig {
    /// Domain the platform is actually served from.
    pub target_domain: Option<String>,
    /// Network whose records are reconciled.
    pub network_id: Option<i64>,
    /// When true the engine does nothing at all.
    pub disabled: bool,
    /// Written to the network `admin_email` option before rewriting.
    pub admin_email: Option<String>,
    /// Scheme forced onto every rewritten URL; `None` keeps each URL's own.
    pub url_scheme: Option<UrlScheme>,
    /// Strip a leading `www.` from tenant domains before substitution.
    pub strip_www: bool,
    pub notification: NotificationSpec,
}

impl MigrationConfig {
    /// Target domain with surrounding whitespace removed, if not blank.
    pub fn target_domain(&self) -> Option<&str> {
        self.target_domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Admin email override, if not blank.
    pub fn admin_email(&self) -> Option<&str> {
        self.admin_email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

/// Why the engine did not run at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InertReason {
    Disabled,
    MissingTargetDomain,
    MissingNetworkId,
}

impl InertReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InertReason::Disabled => "disabled",
            InertReason::MissingTargetDomain => "missing_target_domain",
            InertReason::MissingNetworkId => "missing_network_id",
        }
    }
}

/// The substitution a migration applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainChange {
    pub network_id: i64,
    /// Root of the domain currently stored for the network.
    pub old_root: String,
    /// Root of the target domain; only used for comparison and reporting.
    pub new_root: String,
    /// Target domain exactly as configured; this is what gets written.
    pub target_domain: String,
    /// Path of the network row, used to rebuild the network URL.
    pub network_path: String,
    pub admin_email: Option<String>,
    pub strip_www: bool,
}

/// Result of comparing configuration with the stored network domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftDecision {
    /// Required configuration is absent or the engine is disabled.
    Inert(InertReason),
    /// Stored and target roots already agree, or nothing is stored.
    NoDrift,
    Required(DomainChange),
}

impl DriftDecision {
    pub fn is_required(&self) -> bool {
        matches!(self, DriftDecision::Required(_))
    }
}

/// Counts and values produced by a completed rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub sites_rewritten: usize,
    pub site_urls_rewritten: usize,
    /// Tenants without a stored `siteurl` option.
    pub sites_skipped: Vec<i64>,
    /// New `home`/`siteurl` of the network.
    pub network_url: String,
}

/// What a call to the migration runner ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    Inert(InertReason),
    NoDrift,
    Migrated {
        change: DomainChange,
        report: RewriteReport,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_target_domain_is_none() {
        let config = MigrationConfig {
            target_domain: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.target_domain(), None);
    }

    #[test]
    fn test_target_domain_is_trimmed() {
        let config = MigrationConfig {
            target_domain: Some(" example.local\n".to_string()),
            ..Default::default()
        };
        assert_eq!(config.target_domain(), Some("example.local"));
    }

    #[test]
    fn test_blank_admin_email_is_none() {
        let config = MigrationConfig {
            admin_email: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.admin_email(), None);
    }

    #[test]
    fn test_decision_is_required() {
        assert!(!DriftDecision::NoDrift.is_required());
        assert!(!DriftDecision::Inert(InertReason::Disabled).is_required());
    }
}
