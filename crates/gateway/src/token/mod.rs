//! Access-token persistence and short-lived memoization.

mod cache;
mod sqlite;
mod store;

pub use cache::{Clock, SystemClock, TokenCache, TOKEN_TTL_SECS};
pub use sqlite::SqliteTokenStore;
pub use store::{InMemoryTokenStore, TokenStore, TokenStoreError, ACCESS_TOKEN_KEY};
