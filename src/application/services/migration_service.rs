//! Migration entry point.

use super::drift_detector::DriftDetector;
use super::notification_service::NotificationService;
use super::rewrite_service::RewriteService;
use crate::domain::migration::{DriftDecision, MigrationConfig, MigrationOutcome};
use crate::domain::repositories::{NetworkRepository, OptionRepository};
use crate::error::AppError;
use crate::infrastructure::mail::Notifier;
use std::sync::Arc;
use tracing::{error, info};

/// Runs detection, rewrite and notification in order.
///
/// Construction has no side effects; nothing touches storage until
/// [`MigrationService::run`] is called.
pub struct MigrationService<N: NetworkRepository, O: OptionRepository> {
    detector: DriftDetector<N>,
    rewriter: RewriteService<N, O>,
    notifications: NotificationService<O>,
}

impl<N: NetworkRepository, O: OptionRepository> MigrationService<N, O> {
    /// Creates a new migration service.
    pub fn new(
        network_repository: Arc<N>,
        option_repository: Arc<O>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            detector: DriftDetector::new(network_repository.clone()),
            rewriter: RewriteService::new(network_repository, option_repository.clone()),
            notifications: NotificationService::new(option_repository, notifier),
        }
    }

    /// Reports what a run would do, without writing anything.
    pub async fn detect(&self, config: &MigrationConfig) -> DriftDecision {
        self.detector.detect(config).await
    }

    /// Runs the migration once.
    ///
    /// # Flow
    ///
    /// 1. Drift detection; inert or no drift ends the run
    /// 2. Rewrite of sites, options, network row and meta
    /// 3. Notification, only after a successful rewrite
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if any storage operation of the rewrite
    /// fails. Notification problems are never returned.
    #[tracing::instrument(
        name = "migration",
        skip_all,
        fields(network_id = ?config.network_id, target_domain = ?config.target_domain())
    )]
    pub async fn run(&self, config: &MigrationConfig) -> Result<MigrationOutcome, AppError> {
        let change = match self.detector.detect(config).await {
            DriftDecision::Inert(reason) => {
                metrics::counter!("domain_sync_runs_total", "outcome" => "inert").increment(1);
                return Ok(MigrationOutcome::Inert(reason));
            }
            DriftDecision::NoDrift => {
                metrics::counter!("domain_sync_runs_total", "outcome" => "no_drift").increment(1);
                return Ok(MigrationOutcome::NoDrift);
            }
            DriftDecision::Required(change) => change,
        };

        info!(
            old_root = %change.old_root,
            new_root = %change.new_root,
            scheme = config.url_scheme.map(|s| s.as_str()).unwrap_or("unchanged"),
            strip_www = change.strip_www,
            "Domain drift detected, migrating"
        );

        let report = match self.rewriter.apply(&change, config.url_scheme).await {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, details = %e.details(), "Domain migration failed");
                metrics::counter!("domain_sync_runs_total", "outcome" => "failed").increment(1);
                return Err(e);
            }
        };

        metrics::counter!("domain_sync_runs_total", "outcome" => "migrated").increment(1);
        metrics::counter!("domain_sync_sites_rewritten_total")
            .increment(report.sites_rewritten as u64);

        self.notifications
            .dispatch(&config.notification, &change, &report)
            .await;

        Ok(MigrationOutcome::Migrated { change, report })
    }
}
