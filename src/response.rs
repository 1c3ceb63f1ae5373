use std::fmt;

use reqwest::{header::HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

/// Body of a successful Heap response.
///
/// The Heap API does not currently return any content on success.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {}

/// A successful response from Heap.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code (always 2xx).
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: SuccessResponse,
}

/// Error body returned by Heap on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Whatever Heap sent back alongside an error status.
///
/// `ErrorBody` allows a non-standard body to be kept without failing error handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// Exactly the documented `{"error": "..."}` shape.
    Structured(ErrorResponse),
    /// Any other body, including an error object with extra fields. Non-JSON text is kept as a
    /// JSON string.
    Other(serde_json::Value),
}

impl ErrorBody {
    /// Parse a raw response body. Returns `None` for an empty body.
    pub(crate) fn parse(raw: &str) -> Option<ErrorBody> {
        if raw.trim().is_empty() {
            return None;
        }
        let body = serde_json::from_str(raw)
            .unwrap_or_else(|_| ErrorBody::Other(serde_json::Value::String(raw.to_owned())));
        Some(body)
    }

    /// The `error` field, if Heap returned an object with a string `error`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ErrorBody::Structured(response) => Some(&response.error),
            ErrorBody::Other(value) => value.get("error").and_then(serde_json::Value::as_str),
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ErrorBody, ErrorResponse};

    #[test]
    fn parses_structured_error() {
        assert_eq!(
            ErrorBody::parse(r#"{"error":"invalid app_id"}"#),
            Some(ErrorBody::Structured(ErrorResponse {
                error: "invalid app_id".to_owned()
            }))
        );
    }

    #[test]
    fn keeps_unknown_json() {
        assert_eq!(
            ErrorBody::parse(r#"{"message":"nope"}"#),
            Some(ErrorBody::Other(json!({"message": "nope"})))
        );
    }

    #[test]
    fn keeps_extra_fields_next_to_error() {
        let body = ErrorBody::parse(r#"{"error":"bad","detail":"app_id 42 unknown"}"#).unwrap();

        assert_eq!(
            body,
            ErrorBody::Other(json!({"error": "bad", "detail": "app_id 42 unknown"}))
        );
        assert_eq!(
            body.to_string(),
            r#"{"detail":"app_id 42 unknown","error":"bad"}"#
        );
        assert_eq!(body.error_message(), Some("bad"));
    }

    #[test]
    fn keeps_plain_text() {
        let body = ErrorBody::parse("Bad Gateway").unwrap();
        assert_eq!(body, ErrorBody::Other(json!("Bad Gateway")));
        assert_eq!(body.error_message(), None);
    }

    #[test]
    fn empty_body_is_none() {
        assert_eq!(ErrorBody::parse(""), None);
        assert_eq!(ErrorBody::parse("  \n"), None);
    }

    #[test]
    fn displays_as_json() {
        let body = ErrorBody::parse(r#"{"error":"invalid app_id"}"#).unwrap();
        assert_eq!(body.to_string(), r#"{"error":"invalid app_id"}"#);
    }
}
