//! `hackerlearn-gateway`: outbound clients for the learning-platform backends.
//!
//! Two clients live here:
//! - [`GatewayClient`]: every call is a single HTTP POST of a JSON envelope to
//!   the load-balancer URL; the logical verb travels inside the body as a
//!   [`GatewayMethod`] tag.
//! - [`RestClient`]: conventional REST calls against the major service.
//!
//! Both return an [`ApiResponse`] and never fail outright: missing tokens,
//! transport errors and non-2xx statuses all come back as data.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod method;
pub mod response;
pub mod rest;
pub mod token;

mod transport;

pub use client::GatewayClient;
pub use config::{ClientConfig, ConfigError};
pub use envelope::{GatewayEnvelope, GatewayRequest};
pub use error::GatewayError;
pub use method::GatewayMethod;
pub use response::ApiResponse;
pub use rest::RestClient;
pub use token::{
    Clock, InMemoryTokenStore, SqliteTokenStore, SystemClock, TokenCache, TokenStore,
    TokenStoreError, ACCESS_TOKEN_KEY, TOKEN_TTL_SECS,
};
