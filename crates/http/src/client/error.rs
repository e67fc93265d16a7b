//! Client error types

use serde_json::Value;
use thiserror::Error;
use videoflix_core::ValidationError;

/// Fallback text when a failed response carries no readable messages
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Request rejected before sending by form validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Credential cannot be sent as a header value
    #[error("Invalid header: {0}")]
    Header(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Response body text for status errors
    fn body(&self) -> Option<&str> {
        match self {
            Self::BadRequest(m)
            | Self::AuthenticationFailed(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::ServerError { message: m, .. } => Some(m),
            _ => None,
        }
    }

    /// Text suitable for showing to the user
    ///
    /// JSON error bodies such as `{"email": ["already registered"]}` are
    /// flattened into `"already registered"`, multiple messages joined with
    /// `" | "`.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            _ => self
                .body()
                .map_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string(), flatten_error_body),
        }
    }

    /// The `message` field of a JSON error body, if present
    pub fn message_field(&self) -> Option<String> {
        let body: Value = serde_json::from_str(self.body()?).ok()?;
        body.get("message")?.as_str().map(str::to_string)
    }
}

/// Flatten an error response body into a single display string
pub fn flatten_error_body(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            trimmed.to_string()
        };
    };

    let messages: Vec<String> = match &value {
        Value::Object(map) => map
            .values()
            .flat_map(|v| match v {
                Value::Array(items) => items.iter().map(display_value).collect(),
                other => vec![display_value(other)],
            })
            .filter(|m| !m.is_empty())
            .collect(),
        Value::Array(items) => items.iter().map(display_value).collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    };

    if messages.is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        messages.join(" | ")
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, String::new()),
            ClientError::BadRequest(_)
        ));
        let err = ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream".into());
        assert_eq!(err.status(), Some(502));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_flatten_field_errors() {
        let body = r#"{"email": ["Already registered.", "Check spelling."], "password": "Too short."}"#;
        assert_eq!(
            flatten_error_body(body),
            "Already registered. | Check spelling. | Too short."
        );
    }

    #[test]
    fn test_flatten_fallbacks() {
        assert_eq!(flatten_error_body("{}"), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(flatten_error_body(""), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(flatten_error_body("Bad Gateway"), "Bad Gateway");
        assert_eq!(flatten_error_body(r#"{"detail": null}"#), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_user_message() {
        let err = ClientError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"non_field_errors": ["Invalid credentials."]}"#.into(),
        );
        assert_eq!(err.user_message(), "Invalid credentials.");

        let err = ClientError::Configuration("x".into());
        assert_eq!(err.user_message(), UNKNOWN_ERROR_MESSAGE);

        let err = ClientError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.user_message(), "Passwords do not match");
    }

    #[test]
    fn test_message_field() {
        let err = ClientError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Token expired."}"#.into(),
        );
        assert_eq!(err.message_field().as_deref(), Some("Token expired."));

        let err = ClientError::from_status(StatusCode::BAD_REQUEST, "plain".into());
        assert_eq!(err.message_field(), None);
    }
}
