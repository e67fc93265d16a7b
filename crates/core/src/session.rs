//! In-memory session store holding the access credential and its identity

use crate::identity::{Credential, Identity};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// A decoded credential together with the identity it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub credential: Credential,
    pub identity: Identity,
}

/// Process-wide holder of the current session
///
/// Credential and identity are published as one value, so observers never
/// see one without the other. Clones share state.
#[derive(Clone, Debug)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Store a new access token
    ///
    /// A token that fails to decode clears the session instead; the decode
    /// error is logged, not returned. Returns whether an identity was stored.
    pub fn set_credential(&self, token: impl Into<Credential>) -> bool {
        let credential = token.into();
        match credential.decode() {
            Ok(identity) => {
                debug!(user_id = identity.user_id, "Session credential updated");
                self.tx.send_replace(Some(Session {
                    credential,
                    identity,
                }));
                true
            }
            Err(e) => {
                warn!("Discarding undecodable access token: {e}");
                self.tx.send_replace(None);
                false
            }
        }
    }

    /// Current credential, if any
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.tx.borrow().as_ref().map(|s| s.credential.clone())
    }

    /// Identity of the current session, if any
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.tx.borrow().as_ref().map(|s| s.identity)
    }

    /// Current session snapshot
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Drop credential and identity together
    pub fn clear(&self) {
        let previous = self.tx.send_replace(None);
        if previous.is_some() {
            debug!("Session cleared");
        }
    }

    /// Continuously updated authentication flag
    #[must_use]
    pub fn is_authenticated(&self) -> AuthenticationWatch {
        AuthenticationWatch {
            rx: self.tx.subscribe(),
        }
    }

    /// Whether the current identity carries a re-auth deadline in the future
    #[must_use]
    pub fn has_valid_reauth(&self) -> bool {
        self.has_valid_reauth_at(Utc::now().timestamp())
    }

    #[must_use]
    pub fn has_valid_reauth_at(&self, now: i64) -> bool {
        self.identity().is_some_and(|id| id.reauth_valid_at(now))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscription to the authentication state of a [`SessionStore`]
///
/// Starts with the store's latest value.
#[derive(Debug, Clone)]
pub struct AuthenticationWatch {
    rx: watch::Receiver<Option<Session>>,
}

impl AuthenticationWatch {
    /// Latest authentication value
    #[must_use]
    pub fn current(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait for the next session update and return the new value
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().is_some())
    }
}
