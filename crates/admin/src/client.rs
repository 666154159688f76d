use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use hackerlearn_catalog::sort_by_sequence;
use hackerlearn_core::{DomainError, Sequenced};
use hackerlearn_gateway::{
    ApiResponse, ClientConfig, GatewayClient, GatewayError, GatewayRequest, RestClient, TokenStore,
};

/// Catalog operations over the gateway and the major service.
pub struct CatalogClient {
    pub(crate) gateway: GatewayClient,
    pub(crate) majors: RestClient,
}

impl CatalogClient {
    pub fn new(gateway: GatewayClient, majors: RestClient) -> Self {
        Self { gateway, majors }
    }

    /// Both clients share one token store.
    pub fn from_config(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, GatewayError> {
        Ok(Self::new(
            GatewayClient::new(config, tokens.clone())?,
            RestClient::new(config, tokens)?,
        ))
    }

    pub fn gateway(&self) -> &GatewayClient {
        &self.gateway
    }

    pub fn major_service(&self) -> &RestClient {
        &self.majors
    }
}

pub(crate) fn rejected<T>(err: DomainError) -> ApiResponse<T> {
    tracing::debug!(error = %err, "request rejected before sending");
    ApiResponse::failure(GatewayError::InvalidBody(err.to_string()))
}

pub(crate) fn json_request<B: Serialize + ?Sized>(
    endpoint: impl Into<String>,
    body: &B,
) -> Result<GatewayRequest, GatewayError> {
    GatewayRequest::new(endpoint).with_json(body)
}

/// List endpoints answer with a JSON array, or with a `{message}` /
/// `{error}` object (or nothing) when there is nothing to list.
pub(crate) fn list_from<T: DeserializeOwned>(res: ApiResponse<Value>) -> ApiResponse<Vec<T>> {
    let status = res.status();
    match res.into_result() {
        Ok(Value::Array(items)) => match serde_json::from_value(Value::Array(items)) {
            Ok(list) => ApiResponse::success(list, status),
            Err(e) => ApiResponse::failure(GatewayError::Decode {
                status,
                message: e.to_string(),
            }),
        },
        Ok(Value::Null) => ApiResponse::success(Vec::new(), status),
        Ok(Value::Object(map)) if map.contains_key("message") || map.contains_key("error") => {
            ApiResponse::success(Vec::new(), status)
        }
        Ok(_) => ApiResponse::failure(GatewayError::Decode {
            status,
            message: "expected a list".to_string(),
        }),
        Err(e) => ApiResponse::failure(e),
    }
}

pub(crate) fn sorted<T: Sequenced>(res: ApiResponse<Vec<T>>) -> ApiResponse<Vec<T>> {
    res.map(|mut items| {
        sort_by_sequence(&mut items);
        items
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_accepts_array_and_empty_markers() {
        let res: ApiResponse<Vec<i32>> = list_from(ApiResponse::success(json!([1, 2]), 200));
        assert_eq!(res.into_data(), Some(vec![1, 2]));

        let res: ApiResponse<Vec<i32>> = list_from(ApiResponse::success(json!({ "message": "no courses" }), 200));
        assert_eq!(res.into_data(), Some(vec![]));

        let res: ApiResponse<Vec<i32>> = list_from(ApiResponse::success(Value::Null, 204));
        assert_eq!(res.status(), 204);
        assert_eq!(res.into_data(), Some(vec![]));
    }

    #[test]
    fn list_rejects_other_shapes() {
        let res: ApiResponse<Vec<i32>> = list_from(ApiResponse::success(json!({ "id": 1 }), 200));
        assert!(matches!(res.error(), Some(GatewayError::Decode { status: 200, .. })));

        let res: ApiResponse<Vec<i32>> = list_from(ApiResponse::success(json!(["x"]), 200));
        assert!(res.data().is_none());
    }

    #[test]
    fn list_keeps_upstream_failure() {
        let res: ApiResponse<Vec<i32>> = list_from(ApiResponse::failure(GatewayError::MissingToken));
        assert_eq!(res.error(), Some(&GatewayError::MissingToken));
        assert_eq!(res.status(), 500);
    }
}
