//! MySQL implementation of the option repository.

use async_trait::async_trait;
use sqlx::MySqlPool;
use std::sync::Arc;

use super::tables::TableNames;
use crate::domain::entities::OptionScope;
use crate::domain::repositories::OptionRepository;
use crate::error::AppError;

/// MySQL repository for network and tenant option sets.
pub struct MySqlOptionRepository {
    pool: Arc<MySqlPool>,
    tables: TableNames,
}

impl MySqlOptionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<MySqlPool>, tables: TableNames) -> Self {
        Self { pool, tables }
    }
}

#[async_trait]
impl OptionRepository for MySqlOptionRepository {
    async fn get_option(&self, scope: OptionScope, key: &str) -> Result<Option<String>, AppError> {
        let sql = format!(
            "SELECT option_value FROM {} WHERE option_name = ? LIMIT 1",
            self.tables.options(scope)
        );

        let value = sqlx::query_scalar::<_, String>(&sql)
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(value)
    }

    async fn set_option(
        &self,
        scope: OptionScope,
        key: &str,
        value: &str,
    ) -> Result<(), AppError> {
        // option_name is unique per table, so this upserts.
        let sql = format!(
            r#"
            INSERT INTO {} (option_name, option_value)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE option_value = VALUES(option_value)
            "#,
            self.tables.options(scope)
        );

        sqlx::query(&sql)
            .bind(key)
            .bind(value)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
