//! Business logic services for the application layer.

pub mod drift_detector;
pub mod migration_service;
pub mod notification_service;
pub mod rewrite_service;

pub use drift_detector::DriftDetector;
pub use migration_service::MigrationService;
pub use notification_service::NotificationService;
pub use rewrite_service::RewriteService;
