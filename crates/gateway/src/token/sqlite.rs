use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tokio::sync::Mutex;

use super::store::{ACCESS_TOKEN_KEY, TokenStore, TokenStoreError};

/// SQLite-backed key/value storage for the access token.
///
/// The database is opened lazily on first use and the schema created if
/// missing. Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct SqliteTokenStore {
    url: String,
    pool: Arc<Mutex<Option<SqlitePool>>>,
}

impl SqliteTokenStore {
    /// Store backed by the database file at `path` (created if missing).
    pub fn open(path: impl AsRef<Path>) -> Self {
        let url = format!("sqlite://{}", path.as_ref().to_string_lossy());
        Self::from_url(url)
    }

    /// Store at the default location: `{app_data_dir}/hackerlearn/storage.db`.
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::open(default_storage_path()?))
    }

    /// Store backed by an arbitrary SQLite URL (e.g. `sqlite::memory:`).
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool: Arc::new(Mutex::new(None)),
        }
    }

    async fn ensure_initialized(&self) -> anyhow::Result<SqlitePool> {
        let mut pool_guard = self.pool.lock().await;
        if let Some(pool) = pool_guard.as_ref() {
            return Ok(pool.clone());
        }

        let options = SqliteConnectOptions::from_str(&self.url)
            .with_context(|| format!("invalid SQLite URL {:?}", self.url))?
            .create_if_missing(true);

        // A single connection keeps `sqlite::memory:` databases coherent.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open token store at {:?}", self.url))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key        TEXT PRIMARY KEY NOT NULL,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create kv_store table")?;

        *pool_guard = Some(pool.clone());
        Ok(pool)
    }

    async fn pool(&self) -> Result<SqlitePool, TokenStoreError> {
        self.ensure_initialized()
            .await
            .map_err(|e| TokenStoreError::Backend(format!("{e:#}")))
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        let pool = self.pool().await?;

        let row = sqlx::query(
            r#"
            SELECT value
            FROM kv_store
            WHERE key = ?1
            "#,
        )
        .bind(ACCESS_TOKEN_KEY)
        .fetch_optional(&pool)
        .await
        .map_err(|e| TokenStoreError::Backend(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|e| TokenStoreError::Backend(e.to_string()))?;

        Ok(Some(value).filter(|v| !v.trim().is_empty()))
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let pool = self.pool().await?;
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key)
            DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(ACCESS_TOKEN_KEY)
        .bind(token)
        .bind(&now)
        .execute(&pool)
        .await
        .map_err(|e| TokenStoreError::Backend(e.to_string()))?;

        tracing::debug!("access token saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        let pool = self.pool().await?;

        sqlx::query(
            r#"
            DELETE FROM kv_store
            WHERE key = ?1
            "#,
        )
        .bind(ACCESS_TOKEN_KEY)
        .execute(&pool)
        .await
        .map_err(|e| TokenStoreError::Backend(e.to_string()))?;

        tracing::debug!("access token cleared");
        Ok(())
    }
}

/// Resolve `{app_data_dir}/hackerlearn/storage.db`, creating the directory.
pub(crate) fn default_storage_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut dir = base;
    dir.push("hackerlearn");

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create storage directory at {:?}", dir))?;

    dir.push("storage.db");
    Ok(dir)
}
