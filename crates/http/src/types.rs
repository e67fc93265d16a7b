//! Request and response bodies of the Videoflix API

use serde::{Deserialize, Serialize};
use videoflix_core::ValidationError;
use videoflix_core::validation::forms;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        forms::email(&self.email, "email")?;
        forms::required(&self.password, "password")
    }
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        forms::email(&self.email, "email")?;
        forms::password(&self.password, "password")?;
        forms::required(&self.confirm_password, "confirmPassword")?;
        forms::passwords_match(&self.password, &self.confirm_password)
    }
}

/// Password reset mail request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

impl PasswordResetRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        forms::email(&self.email, "email")
    }
}

/// New password for the account identified by the reset link's `uid`/`token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetConfirmRequest {
    pub uid: String,
    pub token: String,
    pub new_password: String,
}

impl PasswordResetConfirmRequest {
    /// Check the link parameters and the new password against its confirmation
    pub fn validate(&self, confirm_password: &str) -> Result<(), ValidationError> {
        forms::required(&self.uid, "uid")?;
        forms::required(&self.token, "token")?;
        forms::password(&self.new_password, "password")?;
        forms::required(confirm_password, "confirmPassword")?;
        forms::passwords_match(&self.new_password, confirm_password)
    }
}

/// Session status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user_id: Option<u64>,
}

/// Access token issued by login or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement carrying an optional human-readable message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub movie_url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub release: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub license_type: String,
    #[serde(default)]
    pub license_url: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub created_at: String,
}
