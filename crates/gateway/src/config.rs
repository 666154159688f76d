//! Client configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::token::SqliteTokenStore;

pub const GATEWAY_URL_VAR: &str = "HACKERLEARN_GATEWAY_URL";
pub const MAJOR_SERVICE_URL_VAR: &str = "HACKERLEARN_MAJOR_SERVICE_URL";
pub const API_CHECK_URL_VAR: &str = "HACKERLEARN_API_CHECK_URL";
pub const STORAGE_PATH_VAR: &str = "HACKERLEARN_STORAGE_PATH";
pub const TIMEOUT_SECS_VAR: &str = "HACKERLEARN_HTTP_TIMEOUT_SECS";

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";
pub const DEFAULT_MAJOR_SERVICE_URL: &str = "http://localhost:8081";
pub const DEFAULT_API_CHECK_URL: &str = "http://localhost:9090/api-check";

/// Transport timeout shared by every outbound call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid http(s) URL: {value:?}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Endpoints and transport settings for the admin clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Load-balancer URL every envelope is POSTed to.
    pub gateway_url: String,
    /// Base URL of the major service REST API.
    pub major_service_url: String,
    /// Proxy returning a target API's Prometheus metrics.
    pub api_check_url: String,
    /// Token database; `None` means the OS data directory.
    pub storage_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into(),
            major_service_url: DEFAULT_MAJOR_SERVICE_URL.to_string(),
            api_check_url: DEFAULT_API_CHECK_URL.to_string(),
            storage_path: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_major_service_url(mut self, url: impl Into<String>) -> Self {
        self.major_service_url = url.into();
        self
    }

    pub fn with_api_check_url(mut self, url: impl Into<String>) -> Self {
        self.api_check_url = url.into();
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the process environment, falling back to local-development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| {
                    tracing::warn!("{key} not set; using default {default}");
                    default.to_string()
                })
        };

        let gateway_url = var(GATEWAY_URL_VAR, DEFAULT_GATEWAY_URL);
        let major_service_url = var(MAJOR_SERVICE_URL_VAR, DEFAULT_MAJOR_SERVICE_URL);
        let api_check_url = var(API_CHECK_URL_VAR, DEFAULT_API_CHECK_URL);

        validate_url(GATEWAY_URL_VAR, &gateway_url)?;
        validate_url(MAJOR_SERVICE_URL_VAR, &major_service_url)?;
        validate_url(API_CHECK_URL_VAR, &api_check_url)?;

        let timeout = match lookup(TIMEOUT_SECS_VAR) {
            None => DEFAULT_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: TIMEOUT_SECS_VAR,
                        value: raw,
                    });
                }
            },
        };

        let storage_path = lookup(STORAGE_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            gateway_url,
            major_service_url,
            api_check_url,
            storage_path,
            timeout,
        })
    }

    /// Open the persistent token store this configuration points at.
    pub fn token_store(&self) -> anyhow::Result<SqliteTokenStore> {
        match &self.storage_path {
            Some(path) => Ok(SqliteTokenStore::open(path)),
            None => SqliteTokenStore::open_default(),
        }
    }
}

fn validate_url(var: &'static str, value: &str) -> Result<(), ConfigError> {
    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            var,
            value: value.to_string(),
        }),
    }
}
