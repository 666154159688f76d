use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;

/// Key under which the access token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token store backend error: {0}")]
    Backend(String),
    #[error("token store lock poisoned")]
    Poisoned,
}

/// Persisted key/value home of the bearer token.
///
/// The clients only ever call [`load`](TokenStore::load); writing the token is
/// the job of whoever performs the login (the CLI's `token set`, an embedding
/// application, a test).
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the current token. Blank values are reported as `None`.
    async fn load(&self) -> Result<Option<String>, TokenStoreError>;

    async fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    async fn clear(&self) -> Result<(), TokenStoreError>;
}

/// In-memory token store.
///
/// Intended for tests and short-lived embeddings. Counts reads so callers can
/// observe how often the store was consulted.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<String>>,
    reads: AtomicUsize,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of `load` calls so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let guard = self.token.read().map_err(|_| TokenStoreError::Poisoned)?;
        Ok(guard.as_ref().filter(|t| !t.trim().is_empty()).cloned())
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut guard = self.token.write().map_err(|_| TokenStoreError::Poisoned)?;
        *guard = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        let mut guard = self.token.write().map_err(|_| TokenStoreError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}
