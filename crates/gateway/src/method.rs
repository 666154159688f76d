//! Logical operation tags carried inside the gateway envelope.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Logical verb of a gateway call.
///
/// This is **not** the HTTP verb: the gateway always receives a POST and
/// dispatches on this tag. The `*Public` variants tell the gateway to skip
/// authentication; the client does not attach a token for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GatewayMethod {
    Get,
    Post,
    Put,
    Delete,
    GetPublic,
    PostPublic,
    PutPublic,
    DeletePublic,
}

impl GatewayMethod {
    pub const ALL: [GatewayMethod; 8] = [
        GatewayMethod::Get,
        GatewayMethod::Post,
        GatewayMethod::Put,
        GatewayMethod::Delete,
        GatewayMethod::GetPublic,
        GatewayMethod::PostPublic,
        GatewayMethod::PutPublic,
        GatewayMethod::DeletePublic,
    ];

    /// Wire tag, as serialized into the envelope.
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayMethod::Get => "GET",
            GatewayMethod::Post => "POST",
            GatewayMethod::Put => "PUT",
            GatewayMethod::Delete => "DELETE",
            GatewayMethod::GetPublic => "GETPUBLIC",
            GatewayMethod::PostPublic => "POSTPUBLIC",
            GatewayMethod::PutPublic => "PUTPUBLIC",
            GatewayMethod::DeletePublic => "DELETEPUBLIC",
        }
    }

    /// Public calls carry no access token.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            GatewayMethod::GetPublic
                | GatewayMethod::PostPublic
                | GatewayMethod::PutPublic
                | GatewayMethod::DeletePublic
        )
    }

    /// The HTTP verb this operation maps to when talking plain REST.
    pub fn http_verb(&self) -> reqwest::Method {
        match self {
            GatewayMethod::Get | GatewayMethod::GetPublic => reqwest::Method::GET,
            GatewayMethod::Post | GatewayMethod::PostPublic => reqwest::Method::POST,
            GatewayMethod::Put | GatewayMethod::PutPublic => reqwest::Method::PUT,
            GatewayMethod::Delete | GatewayMethod::DeletePublic => reqwest::Method::DELETE,
        }
    }

    /// Same verb with the public flag set as requested.
    pub fn with_public(self, public: bool) -> Self {
        use GatewayMethod::*;
        match (self, public) {
            (Get | GetPublic, false) => Get,
            (Post | PostPublic, false) => Post,
            (Put | PutPublic, false) => Put,
            (Delete | DeletePublic, false) => Delete,
            (Get | GetPublic, true) => GetPublic,
            (Post | PostPublic, true) => PostPublic,
            (Put | PutPublic, true) => PutPublic,
            (Delete | DeletePublic, true) => DeletePublic,
        }
    }
}

impl core::fmt::Display for GatewayMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GatewayMethod {
    type Err = GatewayError;

    /// Accepts the wire tag in any case, with or without a `-`/`_` separator
    /// (`getPublic`, `GET_PUBLIC`, `get-public`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();

        GatewayMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| GatewayError::UnknownMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_uppercase_wire_tag() {
        for method in GatewayMethod::ALL {
            let json = serde_json::to_value(method).unwrap();
            assert_eq!(json, serde_json::Value::String(method.as_str().to_string()));
        }
    }

    #[test]
    fn public_flag_matches_suffix() {
        for method in GatewayMethod::ALL {
            assert_eq!(method.is_public(), method.as_str().ends_with("PUBLIC"));
        }
    }

    #[test]
    fn with_public_round_trips_verb() {
        for method in GatewayMethod::ALL {
            let flipped = method.with_public(!method.is_public());
            assert_eq!(flipped.http_verb(), method.http_verb());
            assert_eq!(flipped.is_public(), !method.is_public());
        }
    }

    #[test]
    fn parses_loose_spellings() {
        assert_eq!("get".parse::<GatewayMethod>().unwrap(), GatewayMethod::Get);
        assert_eq!(
            "get-public".parse::<GatewayMethod>().unwrap(),
            GatewayMethod::GetPublic
        );
        assert_eq!(
            "DELETE_PUBLIC".parse::<GatewayMethod>().unwrap(),
            GatewayMethod::DeletePublic
        );
        assert!("PATCH".parse::<GatewayMethod>().is_err());
    }
}
