//! MySQL implementation of the network repository.

use async_trait::async_trait;
use sqlx::MySqlPool;
use std::sync::Arc;

use super::tables::TableNames;
use crate::domain::entities::{NetworkConfig, SiteRecord};
use crate::domain::repositories::NetworkRepository;
use crate::error::AppError;

/// MySQL repository for the network row, tenant sites and network meta.
///
/// Id columns are `BIGINT UNSIGNED` in the platform schema and are cast to
/// signed integers on read.
pub struct MySqlNetworkRepository {
    pool: Arc<MySqlPool>,
    tables: TableNames,
}

impl MySqlNetworkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<MySqlPool>, tables: TableNames) -> Self {
        Self { pool, tables }
    }
}

#[async_trait]
impl NetworkRepository for MySqlNetworkRepository {
    async fn find_network(&self, network_id: i64) -> Result<Option<NetworkConfig>, AppError> {
        let sql = format!(
            "SELECT CAST(id AS SIGNED), domain, path FROM {} WHERE id = ?",
            self.tables.site()
        );

        let row = sqlx::query_as::<_, (i64, String, String)>(&sql)
            .bind(network_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(|(site_id, domain, path)| NetworkConfig::new(site_id, domain, path)))
    }

    async fn list_sites(&self, network_id: i64) -> Result<Vec<SiteRecord>, AppError> {
        let sql = format!(
            r#"
            SELECT CAST(blog_id AS SIGNED), CAST(site_id AS SIGNED), domain, path
            FROM {}
            WHERE site_id = ?
            ORDER BY blog_id
            "#,
            self.tables.blogs()
        );

        let rows = sqlx::query_as::<_, (i64, i64, String, String)>(&sql)
            .bind(network_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(blog_id, site_id, domain, path)| SiteRecord::new(blog_id, site_id, domain, path))
            .collect())
    }

    async fn update_site_domain(&self, blog_id: i64, domain: &str) -> Result<(), AppError> {
        let sql = format!("UPDATE {} SET domain = ? WHERE blog_id = ?", self.tables.blogs());

        sqlx::query(&sql)
            .bind(domain)
            .bind(blog_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn update_network_domain(&self, network_id: i64, domain: &str) -> Result<(), AppError> {
        let sql = format!("UPDATE {} SET domain = ? WHERE id = ?", self.tables.site());

        sqlx::query(&sql)
            .bind(domain)
            .bind(network_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn update_network_meta(
        &self,
        network_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), AppError> {
        let sql = format!(
            "UPDATE {} SET meta_value = ? WHERE site_id = ? AND meta_key = ?",
            self.tables.sitemeta()
        );

        sqlx::query(&sql)
            .bind(value)
            .bind(network_id)
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
