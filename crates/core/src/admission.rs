//! Route admission control for protected views

use crate::readiness::ReadinessGate;
use crate::session::SessionStore;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Public route unauthenticated users are sent to
pub const LANDING_ROUTE: &str = "/startsite";

/// Outcome of a single admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Allow,
    Deny { redirect_to: String },
}

impl Admission {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Sink for navigation side effects
pub trait Navigator: Send + Sync {
    /// Move the application to `path`
    fn navigate_to(&self, path: &str);
}

/// Navigator that records visited locations
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Arc<Mutex<Vec<String>>>,
}

impl NavigationHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent location
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    /// All recorded locations, oldest first
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for NavigationHistory {
    fn navigate_to(&self, path: &str) {
        self.lock().push(path.to_string());
    }
}

/// Decides whether a navigation to a guarded view may proceed
///
/// Every check first waits for the readiness gate, then reads the
/// authentication state exactly once.
#[derive(Clone)]
pub struct RouteAdmission {
    session: SessionStore,
    readiness: ReadinessGate,
    navigator: Arc<dyn Navigator>,
    landing_route: String,
}

impl RouteAdmission {
    pub fn new(
        session: SessionStore,
        readiness: ReadinessGate,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            readiness,
            navigator,
            landing_route: LANDING_ROUTE.to_string(),
        }
    }

    /// Override the redirect target for denied navigations
    #[must_use]
    pub fn with_landing_route(mut self, route: impl Into<String>) -> Self {
        self.landing_route = route.into();
        self
    }

    #[must_use]
    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Run one admission check
    ///
    /// Denials redirect to the landing route before returning.
    pub async fn admit(&self) -> Admission {
        if !self.readiness.is_ready() {
            debug!("Admission waiting for auth readiness");
        }
        self.readiness.wait().await;

        if self.session.is_authenticated().current() {
            Admission::Allow
        } else {
            info!(redirect = %self.landing_route, "Not authenticated, redirecting");
            self.navigator.navigate_to(&self.landing_route);
            Admission::Deny {
                redirect_to: self.landing_route.clone(),
            }
        }
    }
}
