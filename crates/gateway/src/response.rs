//! Result envelope returned by every client call.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::GatewayError;

/// Outcome of a single call: `{ data, error, status }`.
///
/// Calls never return `Err`; failures are captured here instead. On success
/// `data` is `Some` and `error` is `None`. On failure `data` is `None` and
/// `status` is the server's code, or 500 when no response was received.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    data: Option<T>,
    error: Option<GatewayError>,
    status: u16,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, status: u16) -> Self {
        Self {
            data: Some(data),
            error: None,
            status,
        }
    }

    pub fn failure(error: GatewayError) -> Self {
        Self {
            data: None,
            status: error.status(),
            error: Some(error),
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn error(&self) -> Option<&GatewayError> {
        self.error.as_ref()
    }

    /// Human-readable error, as shown to the operator.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result` for `?`-style call sites.
    pub fn into_result(self) -> Result<T, GatewayError> {
        match (self.data, self.error) {
            (_, Some(err)) => Err(err),
            (Some(data), None) => Ok(data),
            (None, None) => Err(GatewayError::Decode {
                status: self.status,
                message: "response carried no data".to_string(),
            }),
        }
    }

    /// Transform the payload, keeping status and error.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: self.data.map(f),
            error: self.error,
            status: self.status,
        }
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.error.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("ApiResponse", len)?;
        state.serialize_field("data", &self.data)?;
        if let Some(err) = &self.error {
            state.serialize_field("error", &err.to_string())?;
        }
        state.serialize_field("status", &self.status)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_takes_status_from_error() {
        let res: ApiResponse<()> = ApiResponse::failure(GatewayError::Status {
            status: 403,
            body: "nope".into(),
        });
        assert_eq!(res.status(), 403);
        assert!(res.data().is_none());
        assert!(!res.is_success());
    }

    #[test]
    fn serializes_like_the_wire_result() {
        let ok = ApiResponse::success(json!([{ "id": "1" }]), 200);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "data": [{ "id": "1" }], "status": 200 })
        );

        let err: ApiResponse<serde_json::Value> = ApiResponse::failure(GatewayError::MissingToken);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "data": null,
                "error": "Access token required but not available",
                "status": 500
            })
        );
    }

    #[test]
    fn into_result_surfaces_error() {
        let err: ApiResponse<u8> = ApiResponse::failure(GatewayError::MissingToken);
        assert_eq!(err.into_result(), Err(GatewayError::MissingToken));
        assert_eq!(ApiResponse::success(7u8, 200).into_result(), Ok(7));
    }
}
