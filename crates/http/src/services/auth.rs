//! Authentication service coordinating API calls with the session store

use crate::client::{ClientError, VideoflixClient};
use crate::types::{
    AuthStatusResponse, LoginRequest, MessageResponse, PasswordResetConfirmRequest,
    PasswordResetRequest, RegisterRequest, TokenResponse,
};
use videoflix_core::SessionStore;

/// Message shown when email verification fails without a backend message
pub const VERIFICATION_FAILED_MESSAGE: &str = "Verification failed.";

/// Authentication operations that keep the [`SessionStore`] in sync
#[derive(Clone)]
pub struct AuthService {
    client: VideoflixClient,
    session: SessionStore,
}

impl AuthService {
    pub fn new(client: VideoflixClient, session: SessionStore) -> Self {
        Self { client, session }
    }

    pub fn client(&self) -> &VideoflixClient {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Backend view of the current cookie session
    pub async fn status(&self) -> Result<AuthStatusResponse, ClientError> {
        self.client.auth_status().await
    }

    /// Sign in and store the issued credential
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        request.validate()?;
        let response = self.client.login(request).await?;
        if self.session.set_credential(response.access.as_str()) {
            info!(user_id = ?self.session.identity().map(|i| i.user_id), "Logged in");
        }
        Ok(response)
    }

    /// Exchange the refresh cookie for a new credential
    ///
    /// Returns whether a usable credential is stored afterwards. Any failure
    /// clears the session.
    pub async fn refresh_access_token(&self) -> bool {
        match self.client.refresh_token().await {
            Ok(token) => self.session.set_credential(token.access),
            Err(e) => {
                warn!("Access token refresh failed: {e}");
                self.session.clear();
                false
            }
        }
    }

    /// End the backend session
    ///
    /// A failed logout call is logged; the local session is cleared either way.
    pub async fn logout(&self) {
        match self.client.logout().await {
            Ok(_) => info!("Logged out"),
            Err(e) => warn!("Logout request failed: {e}"),
        }
        self.session.clear();
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ClientError> {
        request.validate()?;
        self.client.register(request).await
    }

    pub async fn request_password_reset(
        &self,
        request: &PasswordResetRequest,
    ) -> Result<MessageResponse, ClientError> {
        request.validate()?;
        self.client.request_password_reset(request).await
    }

    /// Set a new password after checking it against its confirmation
    pub async fn confirm_new_password(
        &self,
        request: &PasswordResetConfirmRequest,
        confirm_password: &str,
    ) -> Result<MessageResponse, ClientError> {
        request.validate(confirm_password)?;
        self.client.confirm_password_reset(request).await
    }

    /// Verify an email address
    ///
    /// The error is the backend's `message` field, or
    /// [`VERIFICATION_FAILED_MESSAGE`] when there is none.
    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse, String> {
        self.client.verify_email(token).await.map_err(|e| {
            debug!("Email verification failed: {e}");
            e.message_field()
                .unwrap_or_else(|| VERIFICATION_FAILED_MESSAGE.to_string())
        })
    }
}
