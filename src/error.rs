//! Error Types
//!
//! Failures of the two backend calls and of the camera flow, plus the rules
//! that turn a failed request into a message a person can read.

use thiserror::Error;

/// Shown for 429 responses that carry no message of their own.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please wait and try again.";

/// Body of a non-2xx response
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// No body, or one that could not be read
    Empty,
    /// A body that is not JSON
    Text(String),
    /// A JSON body
    Json(serde_json::Value),
}

impl ErrorBody {
    /// Classify raw response text: JSON when it parses, plain text otherwise.
    pub fn from_text(text: String) -> Self {
        if text.is_empty() {
            return ErrorBody::Empty;
        }
        match serde_json::from_str::<serde_json::Value>(&text) {
            // A JSON string literal is still "a plain string body"
            Ok(serde_json::Value::String(s)) => ErrorBody::Text(s),
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(text),
        }
    }

    /// The message carried by the body itself, if any.
    pub fn message(&self) -> Option<&str> {
        let message = match self {
            ErrorBody::Empty => None,
            ErrorBody::Text(text) => Some(text.as_str()),
            ErrorBody::Json(value) => value.get("message").and_then(|m| m.as_str()),
        };
        message.filter(|m| !m.is_empty())
    }
}

/// Errors from the recipe backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("HTTP {status}")]
    Http { status: u16, body: ErrorBody },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The response could not be decoded
    #[error("Parse error: {0}")]
    Decode(String),

    /// The request could not be built
    #[error("Request build error: {0}")]
    Request(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Message derived from the error alone: body string, then the body's
    /// `message` field, then the transport error text.
    pub fn api_message(&self) -> Option<String> {
        match self {
            ClientError::Http { body, .. } => body.message().map(str::to_string),
            ClientError::Network(text) | ClientError::Decode(text) | ClientError::Request(text)
                if !text.is_empty() =>
            {
                Some(self.to_string())
            }
            _ => None,
        }
    }

    /// Text to show the user in place of a successful result.
    pub fn user_message(&self, fallback: &str) -> String {
        let api_message = self.api_message();

        if self.is_rate_limited() {
            return api_message.unwrap_or_else(|| RATE_LIMIT_MESSAGE.to_string());
        }

        api_message.unwrap_or_else(|| fallback.to_string())
    }
}

/// Errors from the camera flow and preview handling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera is not available on this device")]
    Unsupported,

    #[error("could not acquire camera stream: {0}")]
    Acquire(String),

    #[error("no video surface to render into")]
    NoSurface,

    #[error("video playback failed: {0}")]
    Playback(String),

    #[error("no 2d drawing context")]
    NoContext,

    #[error("frame encoding produced no image")]
    EmptyBlob,

    #[error("camera is not active")]
    NotActive,

    /// A later start or stop took over while this start was pending
    #[error("camera start superseded")]
    Superseded,

    #[error("preview failed: {0}")]
    Preview(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FALLBACK: &str = "fallback";

    fn http(status: u16, body: ErrorBody) -> ClientError {
        ClientError::Http { status, body }
    }

    #[test]
    fn test_string_body_is_used_verbatim() {
        let err = http(500, ErrorBody::Text("kitchen on fire".into()));
        assert_eq!(err.user_message(FALLBACK), "kitchen on fire");
    }

    #[test]
    fn test_json_message_field_is_used() {
        let err = http(400, ErrorBody::Json(json!({"error": "validation_error", "message": "'message' is required."})));
        assert_eq!(err.user_message(FALLBACK), "'message' is required.");
    }

    #[test]
    fn test_json_without_message_falls_back() {
        let err = http(400, ErrorBody::Json(json!({"error": "No file selected."})));
        assert_eq!(err.user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn test_rate_limit_without_message_uses_fixed_text() {
        let err = http(429, ErrorBody::Empty);
        assert_eq!(err.user_message(FALLBACK), RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn test_rate_limit_prefers_server_message() {
        let err = http(429, ErrorBody::Json(json!({"error": "rate_limited", "message": "slow down", "details": {}})));
        assert_eq!(err.user_message(FALLBACK), "slow down");
    }

    #[test]
    fn test_empty_string_body_counts_as_absent() {
        let err = http(502, ErrorBody::Text(String::new()));
        assert_eq!(err.user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn test_network_error_uses_transport_text() {
        let err = ClientError::Network("connection refused".into());
        assert_eq!(err.user_message(FALLBACK), "Network error: connection refused");
    }

    #[test]
    fn test_body_classification() {
        assert_eq!(ErrorBody::from_text(String::new()), ErrorBody::Empty);
        assert_eq!(ErrorBody::from_text("oops".into()), ErrorBody::Text("oops".into()));
        assert_eq!(ErrorBody::from_text("\"quoted\"".into()), ErrorBody::Text("quoted".into()));
        assert_eq!(
            ErrorBody::from_text(r#"{"message":"m"}"#.into()),
            ErrorBody::Json(json!({"message": "m"}))
        );
    }
}
