//! Domain layer containing the migration model and storage contracts.
//!
//! Nothing here touches a database or a mail transport; infrastructure
//! implements the traits, application services drive them.
//!
//! # Architecture
//!
//! - [`entities`] - Network, site and option records
//! - [`repositories`] - Data access trait definitions
//! - [`migration`] - Engine configuration, detector decisions and reports
//! - [`notification`] - Notification settings and outgoing messages

pub mod entities;
pub mod migration;
pub mod notification;
pub mod repositories;
