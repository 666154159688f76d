//! Plain REST client for the major service.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::envelope::GatewayRequest;
use crate::error::GatewayError;
use crate::method::GatewayMethod;
use crate::response::ApiResponse;
use crate::token::TokenStore;
use crate::transport;

/// REST client against `{major_service_url}{path}` using real HTTP verbs.
///
/// Non-public calls attach `Authorization: Bearer <token>` when the store has
/// a token and go out unauthenticated otherwise; the service decides. The
/// store is read on every non-public call. Same transport policy and result
/// envelope as [`GatewayClient`](crate::GatewayClient).
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl RestClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, GatewayError> {
        Ok(Self {
            http: transport::build_http_client(config.timeout)?,
            base_url: config.major_service_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
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

    /// `request.endpoint()` is the path (with query) below the base URL.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: GatewayMethod,
        request: GatewayRequest,
    ) -> ApiResponse<T> {
        let url = format!("{}{}", self.base_url, request.endpoint());
        tracing::debug!(method = %method.http_verb(), %url, "major service call");

        let mut builder = self.http.request(method.http_verb(), &url);

        if !method.is_public() {
            match self.tokens.load().await {
                Ok(Some(token)) => builder = builder.bearer_auth(token),
                Ok(None) => {}
                Err(e) => return ApiResponse::failure(GatewayError::TokenStore(e.to_string())),
            }
        }

        if let Some(body) = request.into_body() {
            builder = builder.json(&body);
        }

        let response = match builder.send().await {
            Ok(response) => transport::read_response(response).await,
            Err(e) => ApiResponse::failure(GatewayError::from(e)),
        };

        if let Some(err) = response.error() {
            tracing::warn!(status = response.status(), error = %err, %url, "major service call failed");
        }
        response
    }
}
