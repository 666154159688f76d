use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

/// Freshness window of a memoized token.
pub const TOKEN_TTL_SECS: i64 = 5 * 60;

/// Source of "now" for expiry checks.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Expiring memo of the last token read from the store.
///
/// Owned by a single client instance. Once a token is stored it is served
/// without touching the store until `expires_at`; after that the next call
/// reads the store again. There is no refresh or rotation logic.
///
/// The cache is not cleared when the server rejects a token; a revoked but
/// unexpired token keeps being sent until the window lapses or
/// [`invalidate`](TokenCache::invalidate) is called.
#[derive(Debug, Clone)]
pub struct TokenCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entry: Option<CachedToken>,
}

impl TokenCache {
    /// Cache with the default 5-minute window and the system clock.
    pub fn new() -> Self {
        Self::with_clock(Duration::seconds(TOKEN_TTL_SECS), Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entry: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The memoized token, if still fresh.
    pub fn get(&self) -> Option<String> {
        let now = self.clock.now();
        self.entry
            .as_ref()
            .filter(|e| now < e.expires_at)
            .map(|e| e.token.clone())
    }

    /// Memoize `token` for one freshness window starting now.
    pub fn put(&mut self, token: impl Into<String>) {
        let expires_at = self.clock.now() + self.ttl;
        self.entry = Some(CachedToken {
            token: token.into(),
            expires_at,
        });
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|e| e.expires_at)
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}
