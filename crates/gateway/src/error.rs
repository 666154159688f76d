//! Failure taxonomy for outbound calls.

use thiserror::Error;

/// Status reported for failures that never produced an HTTP response.
pub const FALLBACK_STATUS: u16 = 500;

/// Why a call did not yield data.
///
/// Every variant maps onto the `status`/`error` pair of an
/// [`ApiResponse`](crate::ApiResponse); callers decide how to surface it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// A non-public call found no token in the store. Nothing was sent.
    #[error("Access token required but not available")]
    MissingToken,

    /// The token store itself failed.
    #[error("token store error: {0}")]
    TokenStore(String),

    /// The request body could not be turned into a JSON object.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// A method tag string did not name any [`GatewayMethod`](crate::GatewayMethod).
    #[error("unknown method tag: {0}")]
    UnknownMethod(String),

    /// Connection, DNS, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered outside 2xx.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    /// The server answered 2xx but the body did not match the expected shape.
    #[error("failed to decode response: {message}")]
    Decode { status: u16, message: String },
}

impl GatewayError {
    /// HTTP status to report alongside this error.
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::Status { status, .. } | GatewayError::Decode { status, .. } => *status,
            _ => FALLBACK_STATUS,
        }
    }

    /// True when the call failed before anything was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingToken
                | GatewayError::TokenStore(_)
                | GatewayError::InvalidBody(_)
                | GatewayError::UnknownMethod(_)
        )
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Transport(format!("request timed out: {err}"))
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_500_without_response() {
        assert_eq!(GatewayError::MissingToken.status(), 500);
        assert_eq!(GatewayError::Transport("refused".into()).status(), 500);
    }

    #[test]
    fn status_errors_carry_server_code() {
        let err = GatewayError::Status {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.status(), 404);
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }

    #[test]
    fn missing_token_message_is_stable() {
        assert_eq!(
            GatewayError::MissingToken.to_string(),
            "Access token required but not available"
        );
        assert!(GatewayError::MissingToken.is_precondition());
    }
}
