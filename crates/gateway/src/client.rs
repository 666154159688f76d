//! Gateway request client.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::envelope::{GatewayEnvelope, GatewayRequest};
use crate::error::GatewayError;
use crate::method::GatewayMethod;
use crate::response::ApiResponse;
use crate::token::{TokenCache, TokenStore};
use crate::transport;

/// Client for the load-balancer gateway.
///
/// Every operation becomes one HTTP POST of a [`GatewayEnvelope`] to the
/// configured gateway URL. Non-public operations first obtain a token (from
/// the [`TokenCache`], else the [`TokenStore`]) and fail without any network
/// I/O when none is available.
///
/// Responses are never memoized: two identical calls make two requests. There
/// are no retries and no request coalescing.
pub struct GatewayClient {
    http: reqwest::Client,
    gateway_url: String,
    tokens: Arc<dyn TokenStore>,
    cache: Mutex<TokenCache>,
}

impl GatewayClient {
    /// Client with the default 5-minute token cache.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, GatewayError> {
        Self::with_token_cache(config, tokens, TokenCache::new())
    }

    /// Client with an explicitly supplied token cache.
    pub fn with_token_cache(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
        cache: TokenCache,
    ) -> Result<Self, GatewayError> {
        Ok(Self {
            http: transport::build_http_client(config.timeout)?,
            gateway_url: config.gateway_url.clone(),
            tokens,
            cache: Mutex::new(cache),
        })
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    pub async fn get<T: DeserializeOwned>(&self, request: impl Into<GatewayRequest>) -> ApiResponse<T> {
        self.call(GatewayMethod::Get, request.into()).await
    }

    pub async fn post<T: DeserializeOwned>(&self, request: impl Into<GatewayRequest>) -> ApiResponse<T> {
        self.call(GatewayMethod::Post, request.into()).await
    }

    pub async fn put<T: DeserializeOwned>(&self, request: impl Into<GatewayRequest>) -> ApiResponse<T> {
        self.call(GatewayMethod::Put, request.into()).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, request: impl Into<GatewayRequest>) -> ApiResponse<T> {
        self.call(GatewayMethod::Delete, request.into()).await
    }

    pub async fn get_public<T: DeserializeOwned>(
        &self,
        request: impl Into<GatewayRequest>,
    ) -> ApiResponse<T> {
        self.call(GatewayMethod::GetPublic, request.into()).await
    }

    pub async fn post_public<T: DeserializeOwned>(
        &self,
        request: impl Into<GatewayRequest>,
    ) -> ApiResponse<T> {
        self.call(GatewayMethod::PostPublic, request.into()).await
    }

    pub async fn put_public<T: DeserializeOwned>(
        &self,
        request: impl Into<GatewayRequest>,
    ) -> ApiResponse<T> {
        self.call(GatewayMethod::PutPublic, request.into()).await
    }

    pub async fn delete_public<T: DeserializeOwned>(
        &self,
        request: impl Into<GatewayRequest>,
    ) -> ApiResponse<T> {
        self.call(GatewayMethod::DeletePublic, request.into()).await
    }

    /// Issue one gateway call with an explicit method tag.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: GatewayMethod,
        request: GatewayRequest,
    ) -> ApiResponse<T> {
        let span = tracing::info_span!(
            "gateway_call",
            request_id = %Uuid::now_v7(),
            method = %method,
            endpoint = %request.endpoint(),
        );

        async move {
            let response = self.dispatch(method, request).await;
            match response.error() {
                None => tracing::debug!(status = response.status(), "gateway call succeeded"),
                Some(err) => tracing::warn!(status = response.status(), error = %err, "gateway call failed"),
            }
            response
        }
        .instrument(span)
        .await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: GatewayMethod,
        request: GatewayRequest,
    ) -> ApiResponse<T> {
        let mut envelope = GatewayEnvelope::new(method, request);

        if !method.is_public() {
            match self.access_token().await {
                Ok(token) => envelope = envelope.with_access_token(token),
                Err(err) => return ApiResponse::failure(err),
            }
        }

        let sent = self.http.post(&self.gateway_url).json(&envelope).send().await;
        match sent {
            Ok(response) => transport::read_response(response).await,
            Err(e) => ApiResponse::failure(GatewayError::from(e)),
        }
    }

    /// Token for a non-public call: cached if fresh, else read from the store.
    ///
    /// The cache lock is held across the store read so concurrent callers
    /// share one read.
    async fn access_token(&self) -> Result<String, GatewayError> {
        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.get() {
            return Ok(token);
        }

        let loaded = self
            .tokens
            .load()
            .await
            .map_err(|e| GatewayError::TokenStore(e.to_string()))?;

        match loaded {
            Some(token) if !token.trim().is_empty() => {
                cache.put(token.clone());
                Ok(token)
            }
            _ => Err(GatewayError::MissingToken),
        }
    }

    /// Drop the memoized token so the next private call re-reads the store.
    pub async fn invalidate_token(&self) {
        self.cache.lock().await.invalidate();
    }
}
