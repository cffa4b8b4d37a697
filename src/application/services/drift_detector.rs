//! Domain drift detection.

use crate::domain::entities::NetworkConfig;
use crate::domain::migration::{DomainChange, DriftDecision, InertReason, MigrationConfig};
use crate::domain::repositories::NetworkRepository;
use crate::utils::root_domain::root_domain;
use std::sync::Arc;
use tracing::{info, warn};

/// Decides whether the stored network domain has drifted from the target.
///
/// This check is what makes the engine idempotent: once a migration has
/// written the target domain, the stored and target roots agree and every
/// later run ends here.
pub struct DriftDetector<N: NetworkRepository> {
    network_repository: Arc<N>,
}

impl<N: NetworkRepository> DriftDetector<N> {
    /// Creates a new detector.
    pub fn new(network_repository: Arc<N>) -> Self {
        Self { network_repository }
    }

    /// Compares configuration with the stored network row.
    ///
    /// Configuration is checked before storage is touched, so an inert
    /// engine performs no reads at all. A failed read of the network row is
    /// logged and treated as "nothing stored".
    pub async fn detect(&self, config: &MigrationConfig) -> DriftDecision {
        let network_id = match required_inputs(config) {
            Ok((network_id, _)) => network_id,
            Err(reason) => {
                info!(reason = reason.as_str(), "Domain sync inert");
                return DriftDecision::Inert(reason);
            }
        };

        let network = match self.network_repository.find_network(network_id).await {
            Ok(network) => network,
            Err(e) => {
                warn!(network_id, error = %e, "Failed to read network domain, skipping");
                None
            }
        };

        let decision = decide(config, network.as_ref());
        if matches!(decision, DriftDecision::NoDrift) {
            info!(network_id, "No domain drift detected");
        }

        decision
    }
}

/// Validates the inputs every run needs.
fn required_inputs(config: &MigrationConfig) -> Result<(i64, &str), InertReason> {
    if config.disabled {
        return Err(InertReason::Disabled);
    }
    let target = config
        .target_domain()
        .ok_or(InertReason::MissingTargetDomain)?;
    let network_id = config.network_id.ok_or(InertReason::MissingNetworkId)?;

    Ok((network_id, target))
}

/// Pure drift decision over configuration and the stored network row.
///
/// # Rules
///
/// 1. Disabled, blank target or missing network id → [`DriftDecision::Inert`]
/// 2. No stored row or an empty stored domain → [`DriftDecision::NoDrift`]
/// 3. Equal root domains, ignoring case → [`DriftDecision::NoDrift`]
/// 4. Otherwise → [`DriftDecision::Required`]
pub fn decide(config: &MigrationConfig, network: Option<&NetworkConfig>) -> DriftDecision {
    let (network_id, target) = match required_inputs(config) {
        Ok(inputs) => inputs,
        Err(reason) => return DriftDecision::Inert(reason),
    };

    let Some(network) = network.filter(|n| !n.domain.trim().is_empty()) else {
        return DriftDecision::NoDrift;
    };

    let old_root = root_domain(network.domain.trim());
    let new_root = root_domain(target);

    if old_root.eq_ignore_ascii_case(&new_root) {
        return DriftDecision::NoDrift;
    }

    DriftDecision::Required(DomainChange {
        network_id,
        old_root,
        new_root,
        target_domain: target.to_string(),
        network_path: network.path_or_root().to_string(),
        admin_email: config.admin_email().map(str::to_string),
        strip_www: config.strip_www,
    })
}
