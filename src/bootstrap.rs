//! Host bootstrap: pool, repositories, notifier and the migration run.
//!
//! Shared by the `multisite-domain-sync` and `admin` binaries.

use crate::application::services::MigrationService;
use crate::config::Config;
use crate::domain::migration::MigrationOutcome;
use crate::infrastructure::mail::{LogNotifier, Notifier, SendmailNotifier};
use crate::infrastructure::persistence::{MySqlNetworkRepository, MySqlOptionRepository, TableNames};

use anyhow::{Context, Result};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Migration service wired to the MySQL repositories.
pub type MySqlMigrationService = MigrationService<MySqlNetworkRepository, MySqlOptionRepository>;

/// Opens the connection pool described by the configuration.
///
/// # Errors
///
/// Returns an error if the database is unreachable within the connect timeout.
pub async fn connect(config: &Config) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Connected to database"
    );

    Ok(pool)
}

/// Picks the notifier: sendmail when a binary is configured, logging otherwise.
pub fn build_notifier(config: &Config) -> Arc<dyn Notifier> {
    match &config.sendmail_path {
        Some(path) => {
            tracing::debug!(sendmail = %path, "Notifications via sendmail");
            Arc::new(SendmailNotifier::new(path.clone(), config.mail_from.clone()))
        }
        None => {
            tracing::info!("Mail delivery disabled (LogNotifier)");
            Arc::new(LogNotifier::new())
        }
    }
}

/// Builds the migration service on top of an open pool.
///
/// # Errors
///
/// Returns an error if the configured table prefix is invalid.
pub fn build_service(config: &Config, pool: MySqlPool) -> Result<MySqlMigrationService> {
    let tables = TableNames::new(&config.table_prefix)
        .map_err(|e| anyhow::anyhow!("Invalid table prefix: {}", e))?;

    let pool = Arc::new(pool);
    let network_repository = Arc::new(MySqlNetworkRepository::new(pool.clone(), tables.clone()));
    let option_repository = Arc::new(MySqlOptionRepository::new(pool, tables));

    Ok(MigrationService::new(
        network_repository,
        option_repository,
        build_notifier(config),
    ))
}

/// Connects, runs the migration once and logs the outcome.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Any storage write of the rewrite fails
pub async fn run(config: Config) -> Result<MigrationOutcome> {
    let pool = connect(&config).await?;
    let service = build_service(&config, pool)?;

    let outcome = service.run(&config.migration).await?;
    log_outcome(&outcome);

    Ok(outcome)
}

fn log_outcome(outcome: &MigrationOutcome) {
    match outcome {
        MigrationOutcome::Inert(reason) => {
            tracing::info!(reason = reason.as_str(), "Domain sync inactive");
        }
        MigrationOutcome::NoDrift => {
            tracing::info!("Stored domains match the target, nothing to do");
        }
        MigrationOutcome::Migrated { change, report } => {
            tracing::info!(
                from = %change.old_root,
                to = %change.target_domain,
                sites = report.sites_rewritten,
                site_urls = report.site_urls_rewritten,
                skipped = report.sites_skipped.len(),
                network_url = %report.network_url,
                "Domain migration complete"
            );
        }
    }
}
