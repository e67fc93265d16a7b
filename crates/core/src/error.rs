//! Error types shared by the client crates

use thiserror::Error;

/// Failure to decode an access credential into an [`Identity`](crate::Identity)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Token does not have the `header.payload.signature` shape
    #[error("Malformed token: expected 3 segments, found {0}")]
    Malformed(usize),

    /// Payload segment is not valid base64url
    #[error("Invalid payload encoding: {0}")]
    Encoding(String),

    /// Payload is not a JSON claims object with the required claims
    #[error("Invalid claims: {0}")]
    Claims(String),
}

/// Client-side form validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field}: invalid email format")]
    InvalidEmail { field: &'static str },

    #[error("{field} must contain at least one uppercase letter and one digit")]
    WeakPassword { field: &'static str },

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Name of the form field the error belongs to
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::InvalidEmail { field }
            | Self::WeakPassword { field } => field,
            Self::PasswordMismatch => "confirmPassword",
        }
    }
}

/// Navigation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("No route matches '{0}'")]
    NotFound(String),
}
