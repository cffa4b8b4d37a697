//! Repository trait definitions for the domain layer.
//!
//! The migration engine talks to storage only through these traits, so it
//! can run against MySQL in production and in-memory fakes in tests.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`NetworkRepository`] - Network row, tenant sites and network meta
//! - [`OptionRepository`] - Network and tenant option sets

pub mod network_repository;
pub mod option_repository;

pub use network_repository::NetworkRepository;
pub use option_repository::OptionRepository;

#[cfg(test)]
pub use network_repository::MockNetworkRepository;
#[cfg(test)]
pub use option_repository::MockOptionRepository;
