/*
[INPUT]:  Error sources (transport phases, API error bodies, encoding, auth config)
[OUTPUT]: Structured error types with operation labels and captured error fields
[POS]:    Error handling layer - unified error types and error body classification
[UPDATE]: When adding new error sources or the error body schema changes
*/

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::types::ErrorResponse;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Phase of a request in which a transport-level failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    PreparingParameters,
    CreatingRequest,
    SendingRequest,
    ReadingResponse,
    ParsingResponse,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::PreparingParameters => "preparing request parameters",
            Operation::CreatingRequest => "creating request",
            Operation::SendingRequest => "sending request",
            Operation::ReadingResponse => "reading response",
            Operation::ParsingResponse => "parsing response",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter value that cannot be rendered as a scalar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot encode parameter `{key}`: {reason}")]
pub struct EncodingError {
    pub key: String,
    pub reason: String,
}

impl EncodingError {
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Non-2xx response from the Tabdeal API.
///
/// Tabdeal does not use one error schema across endpoints, so next to the
/// documented `code`/`msg`/`detail` fields every key seen in the body is kept
/// in `fields`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("API error (status {status}, code {code}): {message}")]
pub struct ApiError {
    pub status: u16,
    pub code: i32,
    pub message: String,
    pub detail: String,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ApiError {
    /// First rendered value of a captured body field
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Main error type for the Tabdeal adapter
#[derive(Error, Debug)]
pub enum TabdealError {
    /// The request never completed, or its response could not be used
    #[error("{operation} failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: BoxError,
    },

    /// API returned an error response
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Authenticated call attempted without a complete key/secret pair
    #[error("Authentication validation failed: {0}")]
    Authentication(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl From<EncodingError> for TabdealError {
    fn from(err: EncodingError) -> Self {
        TabdealError::transport(Operation::PreparingParameters, err)
    }
}

impl TabdealError {
    /// Wrap an underlying cause with the phase it happened in
    pub fn transport(operation: Operation, source: impl Into<BoxError>) -> Self {
        TabdealError::Transport {
            operation,
            source: source.into(),
        }
    }

    /// Phase label for transport errors
    pub fn operation(&self) -> Option<Operation> {
        match self {
            TabdealError::Transport { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            TabdealError::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Borrow the API error, if this is one
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            TabdealError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Check if the error is worth retrying by the caller
    pub fn is_retryable(&self) -> bool {
        match self {
            TabdealError::Transport { operation, .. } => matches!(
                operation,
                Operation::SendingRequest | Operation::ReadingResponse
            ),
            TabdealError::Api(err) => err.status == 429 || err.status >= 500,
            _ => false,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        match self {
            TabdealError::Authentication(_) => true,
            TabdealError::Api(err) => err.status == 401 || err.status == 403,
            _ => false,
        }
    }
}

/// Result type alias for Tabdeal operations
pub type Result<T> = std::result::Result<T, TabdealError>;

/// Build an [`ApiError`] from a non-2xx status and its raw body.
///
/// Never fails: bodies that are not JSON only yield the fallback message.
pub fn classify(status: u16, body: &[u8]) -> ApiError {
    let mut err = ApiError {
        status,
        code: 0,
        message: String::new(),
        detail: String::new(),
        fields: BTreeMap::new(),
    };

    // Only a JSON object can carry named fields
    let object = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => object,
        _ => serde_json::Map::new(),
    };

    // Documented fields
    if let Ok(known) = ErrorResponse::deserialize(&Value::Object(object.clone())) {
        if known.code != 0 {
            err.code = known.code;
            err.fields.insert("code".to_string(), vec![known.code.to_string()]);
        }
        if !known.msg.is_empty() {
            err.fields.insert("msg".to_string(), vec![known.msg.clone()]);
            err.message = known.msg;
        }
        if !known.detail.is_empty() {
            err.fields.insert("detail".to_string(), vec![known.detail.clone()]);
            err.detail = known.detail;
        }
    }

    // Every field actually present
    for (key, value) in object {
        match (key.as_str(), &value) {
            ("msg" | "message", Value::String(text)) if err.message.is_empty() => {
                err.message = text.clone();
            }
            ("detail", Value::String(text)) if err.detail.is_empty() => {
                err.detail = text.clone();
            }
            ("code", code) if err.code == 0 => {
                if let Some(parsed) = parse_code(code) {
                    err.code = parsed;
                }
            }
            _ => {}
        }
        err.fields.insert(key, render_field(&value));
    }

    if err.message.is_empty() {
        err.message = format!("Tabdeal API error ({status})");
    }

    warn!(
        status = err.status,
        code = err.code,
        msg = %err.message,
        "Tabdeal API returned an error"
    );
    err
}

fn render_field(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(render_scalar).collect(),
        other => vec![render_scalar(other)],
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn parse_code(value: &Value) -> Option<i32> {
    match value {
        Value::Number(number) => number.as_i64().and_then(|code| i32::try_from(code).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_documented_fields_and_extras() {
        let err = classify(400, br#"{"code":-1100,"msg":"bad param","extra":"x"}"#);

        assert_eq!(err.status, 400);
        assert_eq!(err.code, -1100);
        assert_eq!(err.message, "bad param");
        assert_eq!(err.detail, "");
        assert_eq!(err.fields.get("extra"), Some(&vec!["x".to_string()]));
        assert_eq!(err.field("code"), Some("-1100"));
        assert_eq!(err.field("msg"), Some("bad param"));
    }

    #[test]
    fn test_classify_empty_body_uses_fallback_message() {
        let err = classify(500, b"");

        assert!(!err.message.is_empty());
        assert!(err.message.contains("500"));
        assert_eq!(err.code, 0);
        assert!(err.fields.is_empty());
    }

    #[test]
    fn test_classify_non_json_body() {
        let err = classify(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.message, "Tabdeal API error (502)");
        assert!(err.fields.is_empty());
    }

    #[test]
    fn test_classify_renders_arrays_and_other_kinds() {
        let body = br#"{
            "msg": "validation failed",
            "detail": "see errors",
            "errors": ["price too low", 3, true],
            "retry": false,
            "meta": {"field": "price"},
            "hint": null
        }"#;
        let err = classify(422, body);

        assert_eq!(err.detail, "see errors");
        assert_eq!(
            err.fields.get("errors"),
            Some(&vec!["price too low".to_string(), "3".to_string(), "true".to_string()])
        );
        assert_eq!(err.field("retry"), Some("false"));
        assert_eq!(err.field("meta"), Some(r#"{"field":"price"}"#));
        assert_eq!(err.field("hint"), Some("null"));
    }

    #[test]
    fn test_classify_falls_back_to_generic_keys() {
        // A string code breaks the documented shape, so the generic pass fills in
        let err = classify(400, br#"{"code":"-2010","message":"insufficient balance"}"#);

        assert_eq!(err.code, -2010);
        assert_eq!(err.message, "insufficient balance");
        assert_eq!(err.field("code"), Some("-2010"));
        assert_eq!(err.field("message"), Some("insufficient balance"));
    }

    #[test]
    fn test_classify_non_object_json() {
        let err = classify(404, br#"["not", "an", "object"]"#);
        assert_eq!(err.message, "Tabdeal API error (404)");
        assert!(err.fields.is_empty());
    }

    #[test]
    fn test_encoding_error_maps_to_preparing_parameters() {
        let err: TabdealError = EncodingError::new("quantity", "non-finite float NaN").into();
        assert_eq!(err.operation(), Some(Operation::PreparingParameters));
        assert!(err.to_string().starts_with("preparing request parameters failed"));
    }

    #[test]
    fn test_classify_array_body_has_no_fields() {
        let err = classify(400, br#"[-1100, "bad param"]"#);

        assert_eq!(err.code, 0);
        assert_eq!(err.message, "Tabdeal API error (400)");
        assert!(err.fields.is_empty());
    }

    #[test]
    fn test_classify_scalar_body_has_no_fields() {
        let err = classify(500, br#""internal error""#);
        assert_eq!(err.message, "Tabdeal API error (500)");
        assert!(err.fields.is_empty());
    }

    #[test]
    fn test_error_retryable() {
        let send_err = TabdealError::transport(Operation::SendingRequest, "connection reset");
        assert!(send_err.is_retryable());

        let parse_err = TabdealError::transport(Operation::ParsingResponse, "bad json");
        assert!(!parse_err.is_retryable());

        assert!(TabdealError::Api(classify(503, b"")).is_retryable());
        assert!(!TabdealError::Api(classify(400, b"")).is_retryable());
        assert!(!TabdealError::Authentication("api key is empty".into()).is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(TabdealError::Authentication("api secret is empty".into()).is_auth_error());
        assert!(TabdealError::Api(classify(401, b"")).is_auth_error());
        assert!(!TabdealError::Api(classify(400, b"")).is_auth_error());
    }

    #[test]
    fn test_operation_labels() {
        assert_eq!(Operation::CreatingRequest.to_string(), "creating request");
        assert_eq!(Operation::SendingRequest.to_string(), "sending request");
        assert_eq!(Operation::ReadingResponse.to_string(), "reading response");
        assert_eq!(Operation::ParsingResponse.to_string(), "parsing response");
    }
}
