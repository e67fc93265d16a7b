//! Bearer credential attachment with one-shot refresh on 401

use super::{ApiUrls, ClientError, Middleware, Next};
use crate::types::TokenResponse;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Response, StatusCode};
use tokio::sync::Mutex;
use videoflix_core::{Credential, SessionStore};

/// Middleware that authenticates outgoing requests from the [`SessionStore`]
///
/// A `401` on any request other than the refresh exchange triggers one
/// refresh and one retry of the original request. If the refresh fails the
/// caller receives the original `401`.
pub struct TokenRefreshGateway {
    session: SessionStore,
    urls: ApiUrls,
    /// Serialises refresh exchanges when coalescing is enabled
    refresh_lock: Option<Mutex<()>>,
}

impl TokenRefreshGateway {
    pub fn new(session: SessionStore, urls: ApiUrls) -> Self {
        Self {
            session,
            urls,
            refresh_lock: None,
        }
    }

    /// Share one refresh exchange between requests that fail concurrently
    ///
    /// A request that waited for another refresh reuses the credential that
    /// refresh stored instead of performing its own exchange.
    #[must_use]
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.refresh_lock = enabled.then(|| Mutex::new(()));
        self
    }

    /// Obtain a fresh credential after `stale` was rejected
    async fn refresh(&self, stale: Option<&Credential>, next: Next<'_>) -> Option<Credential> {
        let _exclusive = match &self.refresh_lock {
            Some(lock) => {
                let guard = lock.lock().await;
                if let Some(current) = self.session.credential() {
                    if stale != Some(&current) {
                        debug!("Reusing credential from concurrent refresh");
                        return Some(current);
                    }
                }
                Some(guard)
            }
            None => None,
        };

        match self.exchange(next).await {
            Ok(token) => {
                let credential = Credential::new(token.access);
                self.session.set_credential(credential.clone());
                Some(credential)
            }
            Err(e) => {
                warn!("Access token refresh failed: {e}");
                self.session.clear();
                None
            }
        }
    }

    /// Perform the cookie-authenticated refresh exchange
    async fn exchange(&self, next: Next<'_>) -> Result<TokenResponse, ClientError> {
        let mut request = Request::new(Method::POST, self.urls.refresh());
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some("{}".into());

        let response = next.run(request).await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::from_status(status, message));
        }
        Ok(response.json().await?)
    }
}

/// Set `Authorization: Bearer <token>`, replacing any existing value
fn set_bearer(request: &mut Request, credential: &Credential) -> Result<(), ClientError> {
    let mut value = HeaderValue::from_str(&credential.bearer())
        .map_err(|e| ClientError::Header(format!("credential is not a valid header value: {e}")))?;
    value.set_sensitive(true);
    request.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}

#[async_trait]
impl Middleware for TokenRefreshGateway {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Result<Response, ClientError> {
        let sent_with = self.session.credential();
        if let Some(credential) = &sent_with {
            set_bearer(&mut request, credential)?;
        }

        if self.urls.is_refresh(request.url()) {
            return next.run(request).await;
        }

        let retry = request.try_clone();
        let response = next.run(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(mut retry) = retry else {
            warn!(url = %response.url(), "Request body cannot be replayed, not refreshing");
            return Ok(response);
        };

        debug!(url = %retry.url(), "Received 401, refreshing access token");
        match self.refresh(sent_with.as_ref(), next).await {
            Some(credential) => {
                set_bearer(&mut retry, &credential)?;
                next.run(retry).await
            }
            None => Ok(response),
        }
    }
}
