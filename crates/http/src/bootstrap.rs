//! Session restoration at application start

use crate::services::AuthService;
use videoflix_core::ReadinessGate;

/// Restores the session from the backend cookie before any route is admitted
pub struct AuthBootstrapper {
    auth: AuthService,
    readiness: ReadinessGate,
}

impl AuthBootstrapper {
    pub fn new(auth: AuthService, readiness: ReadinessGate) -> Self {
        Self { auth, readiness }
    }

    pub fn readiness(&self) -> &ReadinessGate {
        &self.readiness
    }

    /// Check the backend session and refresh the credential if it is live
    ///
    /// Readiness is published when this returns, and also if the future is
    /// dropped early. Returns whether the session is authenticated.
    pub async fn run(&self) -> bool {
        let _ready = self.readiness.ready_on_drop();

        match self.auth.status().await {
            Ok(status) if status.authenticated => {
                debug!(user_id = ?status.user_id, "Backend session active, refreshing token");
                self.auth.refresh_access_token().await
            }
            Ok(_) => {
                debug!("No backend session");
                self.auth.session().clear();
                false
            }
            Err(e) => {
                warn!("Session status check failed: {e}");
                self.auth.session().clear();
                false
            }
        }
    }
}
