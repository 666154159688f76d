//! Shared outbound HTTP settings and response handling.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::response::ApiResponse;

/// Build the one HTTP client a gateway/REST client uses for all its calls.
///
/// Fixed timeout, no cap on response size.
pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(GatewayError::from)
}

/// Turn an HTTP response into the uniform result envelope.
///
/// Only 2xx counts as success. An empty 2xx body decodes as JSON `null`.
pub(crate) async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResponse<T> {
    let status = response.status();
    let code = status.as_u16();

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return ApiResponse::failure(GatewayError::from(e)),
    };

    if !status.is_success() {
        return ApiResponse::failure(GatewayError::Status {
            status: code,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    let decoded = if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice::<T>(b"null")
    } else {
        serde_json::from_slice::<T>(&bytes)
    };

    match decoded {
        Ok(data) => ApiResponse::success(data, code),
        Err(e) => ApiResponse::failure(GatewayError::Decode {
            status: code,
            message: e.to_string(),
        }),
    }
}
