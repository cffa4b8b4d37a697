#![allow(dead_code)]

use async_trait::async_trait;
use multisite_domain_sync::domain::entities::{
    OPTION_ADMIN_EMAIL, OPTION_HOME, OPTION_SITEURL, NetworkConfig, OptionScope, SiteRecord,
};
use multisite_domain_sync::domain::notification::OutgoingMail;
use multisite_domain_sync::domain::repositories::{NetworkRepository, OptionRepository};
use multisite_domain_sync::error::AppError;
use multisite_domain_sync::infrastructure::mail::Notifier;
use multisite_domain_sync::infrastructure::persistence::TableNames;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory network tables: network rows, tenant rows and network meta.
#[derive(Default)]
pub struct InMemoryNetworkRepository {
    networks: Mutex<HashMap<i64, NetworkConfig>>,
    sites: Mutex<Vec<SiteRecord>>,
    meta: Mutex<HashMap<(i64, String), String>>,
    writes: AtomicUsize,
    fail_writes: Mutex<bool>,
}

impl InMemoryNetworkRepository {
    pub fn with_network(network_id: i64, domain: &str, path: &str) -> Self {
        let repo = Self::default();
        repo.networks.lock().unwrap().insert(
            network_id,
            NetworkConfig::new(network_id, domain.to_string(), path.to_string()),
        );
        repo
    }

    pub fn add_site(&self, blog_id: i64, network_id: i64, domain: &str) {
        self.sites.lock().unwrap().push(SiteRecord::new(
            blog_id,
            network_id,
            domain.to_string(),
            "/".to_string(),
        ));
    }

    pub fn set_meta(&self, network_id: i64, key: &str, value: &str) {
        self.meta
            .lock()
            .unwrap()
            .insert((network_id, key.to_string()), value.to_string());
    }

    pub fn network_domain(&self, network_id: i64) -> Option<String> {
        self.networks
            .lock()
            .unwrap()
            .get(&network_id)
            .map(|n| n.domain.clone())
    }

    pub fn site_domain(&self, blog_id: i64) -> Option<String> {
        self.sites
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.blog_id == blog_id)
            .map(|s| s.domain.clone())
    }

    pub fn meta(&self, network_id: i64, key: &str) -> Option<String> {
        self.meta
            .lock()
            .unwrap()
            .get(&(network_id, key.to_string()))
            .cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    fn record_write(&self) -> Result<(), AppError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(AppError::storage("Simulated write failure", json!({})));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl NetworkRepository for InMemoryNetworkRepository {
    async fn find_network(&self, network_id: i64) -> Result<Option<NetworkConfig>, AppError> {
        Ok(self.networks.lock().unwrap().get(&network_id).cloned())
    }

    async fn list_sites(&self, network_id: i64) -> Result<Vec<SiteRecord>, AppError> {
        Ok(self
            .sites
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.site_id == network_id)
            .cloned()
            .collect())
    }

    async fn update_site_domain(&self, blog_id: i64, domain: &str) -> Result<(), AppError> {
        self.record_write()?;
        if let Some(site) = self
            .sites
            .lock()
            .unwrap()
            .iter_mut()
            .find(|s| s.blog_id == blog_id)
        {
            site.domain = domain.to_string();
        }
        Ok(())
    }

    async fn update_network_domain(&self, network_id: i64, domain: &str) -> Result<(), AppError> {
        self.record_write()?;
        if let Some(network) = self.networks.lock().unwrap().get_mut(&network_id) {
            network.domain = domain.to_string();
        }
        Ok(())
    }

    async fn update_network_meta(
        &self,
        network_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), AppError> {
        self.record_write()?;
        // Updates only existing rows, like the SQL UPDATE.
        if let Some(existing) = self
            .meta
            .lock()
            .unwrap()
            .get_mut(&(network_id, key.to_string()))
        {
            *existing = value.to_string();
        }
        Ok(())
    }
}

/// In-memory option tables keyed by physical table name, so the network
/// and the main site share one option set.
#[derive(Default)]
pub struct InMemoryOptionRepository {
    tables: TableNames,
    options: Mutex<HashMap<(String, String), String>>,
    writes: AtomicUsize,
}

impl InMemoryOptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, scope: OptionScope, key: &str, value: &str) {
        self.options
            .lock()
            .unwrap()
            .insert((self.tables.options(scope), key.to_string()), value.to_string());
    }

    pub fn get(&self, scope: OptionScope, key: &str) -> Option<String> {
        self.options
            .lock()
            .unwrap()
            .get(&(self.tables.options(scope), key.to_string()))
            .cloned()
    }

    /// Seeds `home` and `siteurl` with the same URL.
    pub fn put_urls(&self, scope: OptionScope, url: &str) {
        self.put(scope, OPTION_HOME, url);
        self.put(scope, OPTION_SITEURL, url);
    }

    pub fn put_admin_email(&self, email: &str) {
        self.put(OptionScope::Network, OPTION_ADMIN_EMAIL, email);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> HashMap<(String, String), String> {
        self.options.lock().unwrap().clone()
    }
}

#[async_trait]
impl OptionRepository for InMemoryOptionRepository {
    async fn get_option(&self, scope: OptionScope, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.get(scope, key))
    }

    async fn set_option(
        &self,
        scope: OptionScope,
        key: &str,
        value: &str,
    ) -> Result<(), AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.put(scope, key, value);
        Ok(())
    }
}

/// Notifier that keeps every message it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<OutgoingMail>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(mail.clone());
        if self.fail {
            return Err(AppError::notification("Simulated delivery failure", json!({})));
        }
        Ok(())
    }
}

/// Network 1 on `example.com` with tenants 2 and 3, as stored in production.
pub fn production_network() -> (Arc<InMemoryNetworkRepository>, Arc<InMemoryOptionRepository>) {
    let networks = InMemoryNetworkRepository::with_network(1, "example.com", "/");
    networks.add_site(1, 1, "example.com");
    networks.add_site(2, 1, "shop.example.com");
    networks.add_site(3, 1, "www.blog.example.com");
    networks.set_meta(1, "siteurl", "https://example.com/");

    let options = InMemoryOptionRepository::new();
    options.put_urls(OptionScope::Network, "https://example.com");
    options.put_urls(OptionScope::Site(2), "https://shop.example.com");
    options.put_urls(OptionScope::Site(3), "https://www.blog.example.com");
    options.put_admin_email("admin@example.com");

    (Arc::new(networks), Arc::new(options))
}
