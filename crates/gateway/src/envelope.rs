//! The uniform JSON body POSTed to the gateway.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::method::GatewayMethod;

/// What a caller asks for: a logical endpoint plus an optional JSON object.
///
/// The endpoint is a resource path understood by the gateway
/// (e.g. `/course/all?page=2`); query strings are part of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GatewayRequest {
    endpoint: String,
    body: Option<Map<String, Value>>,
}

impl GatewayRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            body: None,
        }
    }

    /// Attach a JSON object as the request body.
    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` and attach it.
    ///
    /// Fails unless `body` serializes to a JSON object.
    pub fn with_json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, GatewayError> {
        match serde_json::to_value(body) {
            Ok(Value::Object(map)) => Ok(self.with_body(map)),
            Ok(other) => Err(GatewayError::InvalidBody(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(GatewayError::InvalidBody(e.to_string())),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<Map<String, Value>> {
        self.body
    }
}

impl From<&str> for GatewayRequest {
    fn from(endpoint: &str) -> Self {
        Self::new(endpoint)
    }
}

impl From<String> for GatewayRequest {
    fn from(endpoint: String) -> Self {
        Self::new(endpoint)
    }
}

/// Envelope for a single gateway call.
///
/// Built fresh for every call and discarded afterwards.
///
/// Notes:
/// - `method` is a logical tag, see [`GatewayMethod`].
/// - `access_token` is only ever set for non-public methods, immediately
///   before transmission; it is omitted from the JSON otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEnvelope {
    endpoint: String,
    method: GatewayMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    req_body: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

impl GatewayEnvelope {
    pub fn new(method: GatewayMethod, request: GatewayRequest) -> Self {
        Self {
            endpoint: request.endpoint,
            method,
            req_body: request.body,
            access_token: None,
        }
    }

    /// Attach the bearer token. Ignored for public methods.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        if !self.method.is_public() {
            self.access_token = Some(token.into());
        }
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> GatewayMethod {
        self.method
    }

    pub fn req_body(&self) -> Option<&Map<String, Value>> {
        self.req_body.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
