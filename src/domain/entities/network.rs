//! Network-level records: the root network row and its meta settings.

/// The single root network record (`{prefix}site`).
///
/// `domain` is the authoritative host name of the whole network and the
/// value the drift detector compares against the target domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub site_id: i64,
    pub domain: String,
    pub path: String,
}

impl NetworkConfig {
    pub fn new(site_id: i64, domain: String, path: String) -> Self {
        Self {
            site_id,
            domain,
            path,
        }
    }

    /// Network path, falling back to `/` when the stored value is empty.
    pub fn path_or_root(&self) -> &str {
        if self.path.is_empty() { "/" } else { &self.path }
    }
}

/// Meta key whose value mirrors the network `siteurl` option.
pub const META_SITEURL: &str = "siteurl";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_config_creation() {
        let network = NetworkConfig::new(1, "example.com".to_string(), "/".to_string());

        assert_eq!(network.site_id, 1);
        assert_eq!(network.domain, "example.com");
        assert_eq!(network.path_or_root(), "/");
    }

    #[test]
    fn test_empty_path_falls_back_to_root() {
        let network = NetworkConfig::new(1, "example.com".to_string(), String::new());
        assert_eq!(network.path_or_root(), "/");

        let nested = NetworkConfig::new(1, "example.com".to_string(), "/wp/".to_string());
        assert_eq!(nested.path_or_root(), "/wp/");
    }
}
