//! Authentication API client methods

use super::{ClientError, VideoflixClient};
use crate::types::{
    AuthStatusResponse, LoginRequest, MessageResponse, PasswordResetConfirmRequest,
    PasswordResetRequest, RegisterRequest, TokenResponse,
};
use reqwest::Method;
use serde_json::json;

impl VideoflixClient {
    /// Ask the backend whether the session cookie belongs to a signed-in user
    pub async fn auth_status(&self) -> Result<AuthStatusResponse, ClientError> {
        let req = self.request(Method::GET, self.urls().status());
        self.execute(req).await
    }

    /// Exchange the refresh cookie for a new access token
    pub async fn refresh_token(&self) -> Result<TokenResponse, ClientError> {
        let req = self
            .request(Method::POST, self.urls().refresh())
            .json(&json!({}));
        self.execute(req).await
    }

    /// Sign in with email and password
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        let req = self.request(Method::POST, self.urls().login()).json(request);
        self.execute(req).await
    }

    /// End the backend session
    pub async fn logout(&self) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(Method::POST, self.urls().logout())
            .json(&json!({}));
        self.execute_optional(req).await
    }

    /// Create an account; the backend sends a verification mail
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(Method::POST, self.urls().register())
            .json(request);
        self.execute_optional(req).await
    }

    /// Request a password reset mail
    pub async fn request_password_reset(
        &self,
        request: &PasswordResetRequest,
    ) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(Method::POST, self.urls().password_reset())
            .json(request);
        self.execute_optional(req).await
    }

    /// Set a new password using the uid/token pair from the reset mail
    pub async fn confirm_password_reset(
        &self,
        request: &PasswordResetConfirmRequest,
    ) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(Method::POST, self.urls().password_reset_confirm())
            .json(request);
        self.execute_optional(req).await
    }

    /// Confirm an email address with the token from the verification link
    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse, ClientError> {
        let req = self.request(Method::GET, self.urls().verify_email(token));
        self.execute_optional(req).await
    }
}
