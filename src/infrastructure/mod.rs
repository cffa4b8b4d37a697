//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and mail delivery.
//!
//! # Modules
//!
//! - [`mail`] - Notifier abstraction (sendmail and log-only implementations)
//! - [`persistence`] - MySQL repository implementations

pub mod mail;
pub mod persistence;
