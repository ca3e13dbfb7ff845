//! Decoded service responses.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

use crate::DeliveryError;

/// Status value the service uses for success.
pub const STATUS_OK: i32 = 1;

/// Response body returned by every endpoint.
///
/// Fields an endpoint doesn't send decode to their empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Response {
    /// 1 on success.
    #[serde(default)]
    pub status: i32,
    /// Request id assigned by the service.
    #[serde(default)]
    pub request: String,
    /// Receipt token, only for emergency messages.
    #[serde(default)]
    pub receipt: Option<String>,
    /// Devices registered for the user (validation endpoint).
    #[serde(default)]
    pub devices: Vec<String>,
    /// Errors reported by the service.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Sound name to display label (sounds endpoint).
    #[serde(default)]
    pub sounds: HashMap<String, String>,
}

impl Response {
    /// Check if the service accepted the request.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Turn a non-success status into [`DeliveryError::Api`].
    pub fn into_result(self) -> Result<Self, DeliveryError> {
        if self.is_success() {
            Ok(self)
        } else {
            warn!(
                request = %self.request,
                status = self.status,
                errors = ?self.errors,
                "Pushover rejected request"
            );
            Err(DeliveryError::Api {
                request: self.request,
                errors: self.errors,
            })
        }
    }
}

/// Decode a raw response body.
pub fn decode_response(body: &str) -> Result<Response, DeliveryError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_with_receipt() {
        let response = decode_response(
            r#"{"status":1,"request":"e460545a8b333d0da2f3602aff3133d6","receipt":"rLqVuqTRh62UzxtmqiaLzQmVcPgiCy"}"#,
        )
        .unwrap();

        assert!(response.is_success());
        assert_eq!(response.request, "e460545a8b333d0da2f3602aff3133d6");
        assert_eq!(response.receipt.as_deref(), Some("rLqVuqTRh62UzxtmqiaLzQmVcPgiCy"));
        assert!(response.errors.is_empty());
    }

    #[test]
    fn test_decode_discovery_fields() {
        let response = decode_response(
            r#"{"status":1,"request":"r1","devices":["phone","desktop"],"sounds":{"pushover":"Pushover (default)","none":"None (silent)"}}"#,
        )
        .unwrap();

        assert_eq!(response.devices, vec!["phone", "desktop"]);
        assert_eq!(response.sounds.get("none").map(String::as_str), Some("None (silent)"));
    }

    #[test]
    fn test_failure_becomes_api_error() {
        let response = decode_response(
            r#"{"user":"invalid","errors":["user identifier is invalid"],"status":0,"request":"5042853c"}"#,
        )
        .unwrap();

        match response.into_result() {
            Err(DeliveryError::Api { request, errors }) => {
                assert_eq!(request, "5042853c");
                assert_eq!(errors, vec!["user identifier is invalid"]);
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_status_is_failure() {
        let response = decode_response("{}").unwrap();
        assert!(!response.is_success());
        assert!(response.into_result().is_err());
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, DeliveryError::Decode(_)));
    }
}
