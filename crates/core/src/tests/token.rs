//! Unsigned JWT builder for tests

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde_json::json;

/// Builds access tokens with the claims layout the backend issues
///
/// The signature segment is a fixed placeholder; the client never verifies it.
#[derive(Debug, Clone)]
pub struct TestToken {
    user_id: u64,
    issued_at: i64,
    expires_at: i64,
    reauth_until: Option<i64>,
}

impl TestToken {
    /// Token for `user_id`, issued now and valid for 15 minutes
    #[must_use]
    pub fn new(user_id: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            user_id,
            issued_at: now,
            expires_at: now + 900,
            reauth_until: None,
        }
    }

    #[must_use]
    pub const fn issued_at(mut self, iat: i64) -> Self {
        self.issued_at = iat;
        self
    }

    #[must_use]
    pub const fn expires_at(mut self, exp: i64) -> Self {
        self.expires_at = exp;
        self
    }

    #[must_use]
    pub const fn reauth_until(mut self, until: i64) -> Self {
        self.reauth_until = Some(until);
        self
    }

    /// Encode as `header.payload.signature`
    #[must_use]
    pub fn encode(&self) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);

        let mut claims = json!({
            "user_id": self.user_id,
            "iat": self.issued_at,
            "exp": self.expires_at,
        });
        if let Some(until) = self.reauth_until {
            claims["re_auth_until"] = json!(until);
        }
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());

        format!("{header}.{payload}.test-signature")
    }
}
