//! Access credentials and the identity claims decoded from them

use crate::error::IdentityError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer access token as issued by the backend
///
/// Opaque to the client apart from its claims payload. `Debug` never prints
/// the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Decode the claims carried by this token
    ///
    /// The signature is not checked; the client holds no verification key.
    pub fn decode(&self) -> Result<Identity, IdentityError> {
        Identity::decode(&self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Identity claims decoded from an access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Subject (user ID)
    pub user_id: u64,
    /// Issued at (Unix seconds)
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiration time (Unix seconds)
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Re-authentication deadline (Unix seconds)
    #[serde(
        rename = "re_auth_until",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reauth_until: Option<i64>,
}

impl Identity {
    /// Decode the payload segment of a JWT
    pub fn decode(token: &str) -> Result<Self, IdentityError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(IdentityError::Malformed(segments.len()));
        }

        let payload = URL_SAFE_NO_PAD
            .decode(segments[1].trim_end_matches('='))
            .map_err(|e| IdentityError::Encoding(e.to_string()))?;

        serde_json::from_slice(&payload).map_err(|e| IdentityError::Claims(e.to_string()))
    }

    /// Whether the re-authentication deadline lies strictly after `now`
    #[must_use]
    pub fn reauth_valid_at(&self, now: i64) -> bool {
        self.reauth_until.is_some_and(|until| until > now)
    }

    #[must_use]
    pub const fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}
