//! Multi-table domain rewrite.

use crate::domain::entities::{
    META_SITEURL, OPTION_ADMIN_EMAIL, OPTION_HOME, OPTION_SITEURL, OptionScope,
};
use crate::domain::migration::{DomainChange, RewriteReport};
use crate::domain::repositories::{NetworkRepository, OptionRepository};
use crate::error::AppError;
use crate::utils::domain_replace::{DomainReplacer, strip_www};
use crate::utils::url_scheme::{UrlScheme, enforce_scheme, scheme_of};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Rewrites every record that encodes the old root domain.
///
/// # Steps
///
/// Order matters, later steps read what earlier ones wrote:
///
/// 0. Admin email override, if any, into the network options
/// 1. Tenant domains: optional `www.` strip, then substitution
/// 2. Tenant `home`/`siteurl`, both set from the rewritten `siteurl`
/// 3. Network `home`/`siteurl`, rebuilt from the target domain
/// 4. Network row domain
/// 5. Network meta `siteurl`
///
/// The first storage error aborts the remaining steps. Nothing is rolled
/// back; re-running after the cause is fixed completes the migration.
pub struct RewriteService<N: NetworkRepository, O: OptionRepository> {
    network_repository: Arc<N>,
    option_repository: Arc<O>,
}

impl<N: NetworkRepository, O: OptionRepository> RewriteService<N, O> {
    /// Creates a new rewrite service.
    pub fn new(network_repository: Arc<N>, option_repository: Arc<O>) -> Self {
        Self {
            network_repository,
            option_repository,
        }
    }

    /// Applies `change` to storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] from the first failed read or write.
    /// Returns [`AppError::Internal`] if the substitution cannot be compiled.
    pub async fn apply(
        &self,
        change: &DomainChange,
        scheme: Option<UrlScheme>,
    ) -> Result<RewriteReport, AppError> {
        let replacer = DomainReplacer::new(&change.old_root, &change.target_domain).map_err(|e| {
            AppError::internal(
                "Failed to build domain substitution",
                json!({ "old_root": change.old_root, "error": e.to_string() }),
            )
        })?;

        let mut report = RewriteReport::default();

        if let Some(email) = change.admin_email.as_deref() {
            self.option_repository
                .set_option(OptionScope::Network, OPTION_ADMIN_EMAIL, email)
                .await?;
            debug!(admin_email = email, "Admin email overridden");
        }

        let blog_ids = self.rewrite_sites(change, &replacer, &mut report).await?;
        self.rewrite_site_urls(&blog_ids, &replacer, scheme, &mut report)
            .await?;

        let network_url = self.rewrite_network_urls(change, scheme).await?;

        self.network_repository
            .update_network_domain(change.network_id, &change.target_domain)
            .await?;

        self.network_repository
            .update_network_meta(change.network_id, META_SITEURL, &network_url)
            .await?;

        report.network_url = network_url;

        info!(
            sites = report.sites_rewritten,
            site_urls = report.site_urls_rewritten,
            skipped = report.sites_skipped.len(),
            network_url = %report.network_url,
            "Domain rewrite complete"
        );

        Ok(report)
    }

    async fn rewrite_sites(
        &self,
        change: &DomainChange,
        replacer: &DomainReplacer,
        report: &mut RewriteReport,
    ) -> Result<Vec<i64>, AppError> {
        let sites = self
            .network_repository
            .list_sites(change.network_id)
            .await?;

        let mut blog_ids = Vec::with_capacity(sites.len());

        for site in sites {
            let domain = if change.strip_www {
                strip_www(&site.domain)
            } else {
                site.domain.as_str()
            };
            let new_domain = replacer.replace(domain);

            self.network_repository
                .update_site_domain(site.blog_id, &new_domain)
                .await?;

            debug!(
                blog_id = site.blog_id,
                from = %site.domain,
                to = %new_domain,
                "Site domain rewritten"
            );

            report.sites_rewritten += 1;
            blog_ids.push(site.blog_id);
        }

        Ok(blog_ids)
    }

    async fn rewrite_site_urls(
        &self,
        blog_ids: &[i64],
        replacer: &DomainReplacer,
        scheme: Option<UrlScheme>,
        report: &mut RewriteReport,
    ) -> Result<(), AppError> {
        for &blog_id in blog_ids {
            let scope = OptionScope::Site(blog_id);

            let Some(siteurl) = self
                .option_repository
                .get_option(scope, OPTION_SITEURL)
                .await?
            else {
                warn!(blog_id, "Site has no siteurl option, skipping URL rewrite");
                report.sites_skipped.push(blog_id);
                continue;
            };

            let url = enforce_scheme(scheme, &replacer.replace(&siteurl));

            self.option_repository
                .set_option(scope, OPTION_HOME, &url)
                .await?;
            self.option_repository
                .set_option(scope, OPTION_SITEURL, &url)
                .await?;

            report.site_urls_rewritten += 1;
        }

        Ok(())
    }

    /// Rebuilds the network URL from the target domain instead of
    /// substituting inside the old one.
    async fn rewrite_network_urls(
        &self,
        change: &DomainChange,
        scheme: Option<UrlScheme>,
    ) -> Result<String, AppError> {
        let current = self
            .option_repository
            .get_option(OptionScope::Network, OPTION_SITEURL)
            .await?;

        let url = network_url(change, current.as_deref(), scheme);

        self.option_repository
            .set_option(OptionScope::Network, OPTION_HOME, &url)
            .await?;
        self.option_repository
            .set_option(OptionScope::Network, OPTION_SITEURL, &url)
            .await?;

        Ok(url)
    }
}

/// Canonical network URL for the target domain.
///
/// Keeps the scheme of the current network `siteurl` (or `http` when there
/// is none) and then applies the enforced scheme, if any.
pub fn network_url(
    change: &DomainChange,
    current_siteurl: Option<&str>,
    scheme: Option<UrlScheme>,
) -> String {
    let base_scheme = current_siteurl
        .and_then(scheme_of)
        .unwrap_or(UrlScheme::Http);

    let path = if change.network_path.starts_with('/') {
        change.network_path.clone()
    } else {
        format!("/{}", change.network_path)
    };

    enforce_scheme(
        scheme,
        &format!("{base_scheme}://{}{path}", change.target_domain),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SiteRecord;
    use crate::domain::repositories::{MockNetworkRepository, MockOptionRepository};

    fn change(path: &str) -> DomainChange {
        DomainChange {
            network_id: 1,
            old_root: "example.com".to_string(),
            new_root: "example.local".to_string(),
            target_domain: "example.local".to_string(),
            network_path: path.to_string(),
            admin_email: None,
            strip_www: false,
        }
    }

    #[test]
    fn test_network_url_keeps_current_scheme() {
        assert_eq!(
            network_url(&change("/"), Some("https://example.com/"), None),
            "https://example.local/"
        );
    }

    #[test]
    fn test_network_url_defaults_to_http() {
        assert_eq!(network_url(&change("/"), None, None), "http://example.local/");
    }

    #[test]
    fn test_network_url_enforces_scheme() {
        assert_eq!(
            network_url(
                &change("/"),
                Some("http://example.com/"),
                Some(UrlScheme::Https)
            ),
            "https://example.local/"
        );
    }

    #[test]
    fn test_network_url_with_subdirectory_path() {
        assert_eq!(
            network_url(&change("/network/"), None, None),
            "http://example.local/network/"
        );
        assert_eq!(
            network_url(&change("network/"), None, None),
            "http://example.local/network/"
        );
    }

    #[tokio::test]
    async fn test_site_write_failure_aborts_remaining_steps() {
        let mut network_repo = MockNetworkRepository::new();
        network_repo.expect_list_sites().times(1).returning(|_| {
            Ok(vec![
                SiteRecord::new(2, 1, "shop.example.com".to_string(), "/".to_string()),
                SiteRecord::new(3, 1, "blog.example.com".to_string(), "/".to_string()),
            ])
        });
        network_repo
            .expect_update_site_domain()
            .times(1)
            .returning(|_, _| Err(AppError::storage("Database error", json!({}))));
        network_repo.expect_update_network_domain().never();
        network_repo.expect_update_network_meta().never();

        let mut option_repo = MockOptionRepository::new();
        option_repo.expect_get_option().never();
        option_repo.expect_set_option().never();

        let service = RewriteService::new(Arc::new(network_repo), Arc::new(option_repo));

        let result = service.apply(&change("/"), None).await;

        assert!(matches!(result, Err(AppError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_admin_email_written_first() {
        let mut network_repo = MockNetworkRepository::new();
        network_repo
            .expect_list_sites()
            .times(1)
            .returning(|_| Err(AppError::storage("Database error", json!({}))));

        let mut option_repo = MockOptionRepository::new();
        option_repo
            .expect_set_option()
            .withf(|scope, key, value| {
                *scope == OptionScope::Network
                    && key == OPTION_ADMIN_EMAIL
                    && value == "dev@example.local"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = RewriteService::new(Arc::new(network_repo), Arc::new(option_repo));

        let mut change = change("/");
        change.admin_email = Some("dev@example.local".to_string());

        let result = service.apply(&change, None).await;

        assert!(result.is_err());
    }
}
