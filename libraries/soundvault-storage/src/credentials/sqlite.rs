//! `SQLite`-backed credential store

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{CredentialKey, CredentialStore};
use crate::error::Result;

/// Credential store persisted in a `SQLite` database.
///
/// Rows are scoped by namespace, so several client instances can share one
/// database file without seeing each other's credentials.
#[derive(Debug, Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
    namespace: String,
}

impl SqliteCredentialStore {
    /// Wrap an existing pool. Migrations must already have been run.
    pub fn new(pool: SqlitePool, namespace: impl Into<String>) -> Self {
        Self {
            pool,
            namespace: namespace.into(),
        }
    }

    /// Connect to `database_url`, run migrations and scope to `namespace`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the migrations fail
    pub async fn open(database_url: &str, namespace: impl Into<String>) -> Result<Self> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool, namespace))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

const UPSERT: &str = "INSERT INTO credentials (namespace, key, value, updated_at)
     VALUES (?, ?, ?, ?)
     ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM credentials WHERE namespace = ? AND key = ?",
        )
        .bind(&self.namespace)
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    async fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        sqlx::query(UPSERT)
            .bind(&self.namespace)
            .bind(key.as_str())
            .bind(value)
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn remove(&self, key: CredentialKey) -> Result<()> {
        sqlx::query("DELETE FROM credentials WHERE namespace = ? AND key = ?")
            .bind(&self.namespace)
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_many(&self, entries: &[(CredentialKey, String)]) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        for (key, value) in entries {
            sqlx::query(UPSERT)
                .bind(&self.namespace)
                .bind(key.as_str())
                .bind(value)
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM credentials WHERE namespace = ?")
            .bind(&self.namespace)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
