//! Application layer services implementing the migration.
//!
//! Services consume repository traits and a notifier, and expose the
//! explicit `run` entry point the host bootstrap calls.
//!
//! # Available Services
//!
//! - [`services::drift_detector::DriftDetector`] - Decides whether a migration is needed
//! - [`services::rewrite_service::RewriteService`] - Rewrites sites, options, network row and meta
//! - [`services::notification_service::NotificationService`] - Best-effort post-migration email
//! - [`services::migration_service::MigrationService`] - Composes the three into one run

pub mod services;
