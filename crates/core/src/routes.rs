//! Application route table and guarded navigation

use crate::admission::{Admission, RouteAdmission};
use crate::error::RouteError;
use std::collections::BTreeMap;
use tracing::debug;

/// Public login view, the target after logout
pub const LOGIN_ROUTE: &str = "/login";

/// A route pattern such as `/movie/:id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub pattern: &'static str,
    /// Whether navigation requires an authenticated session
    pub guarded: bool,
}

impl Route {
    #[must_use]
    pub const fn public(pattern: &'static str) -> Self {
        Self {
            pattern,
            guarded: false,
        }
    }

    #[must_use]
    pub const fn guarded(pattern: &'static str) -> Self {
        Self {
            pattern,
            guarded: true,
        }
    }

    /// Match `path` against this pattern, collecting `:param` segments
    fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let pattern: Vec<&str> = segments(self.pattern).collect();
        let actual: Vec<&str> = segments(path).collect();
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, value) in pattern.iter().zip(&actual) {
            if let Some(name) = expected.strip_prefix(':') {
                params.insert(name.to_string(), (*value).to_string());
            } else if expected != value {
                return None;
            }
        }
        Some(params)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// A resolved route with its path parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Ordered list of known routes; the first match wins
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    #[must_use]
    pub const fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Routes of the Videoflix client
    #[must_use]
    pub fn videoflix() -> Self {
        Self::new(vec![
            Route::guarded("/"),
            Route::public("/startsite"),
            Route::guarded("/home"),
            Route::guarded("/movie/:id"),
            Route::public(LOGIN_ROUTE),
            Route::public("/sign-up"),
            Route::public("/forget-password"),
            Route::public("/new-password"),
            Route::public("/email-verify"),
            Route::public("/imprint"),
            Route::public("/data-protection"),
        ])
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a location, ignoring any query string or fragment
    #[must_use]
    pub fn resolve(&self, location: &str) -> Option<RouteMatch> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        self.routes.iter().find_map(|route| {
            route.matches(path).map(|params| RouteMatch {
                route: *route,
                path: path.to_string(),
                params,
            })
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::videoflix()
    }
}

/// Result of a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The requested view was entered
    Entered(RouteMatch),
    /// Admission was denied and the navigator was sent elsewhere
    Redirected { to: String },
}

/// Resolves locations and applies admission control to guarded routes
#[derive(Clone)]
pub struct Router {
    table: RouteTable,
    admission: RouteAdmission,
}

impl Router {
    pub const fn new(table: RouteTable, admission: RouteAdmission) -> Self {
        Self { table, admission }
    }

    #[must_use]
    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate to `location`
    ///
    /// Guarded routes wait for auth readiness before deciding.
    pub async fn navigate(&self, location: &str) -> Result<Navigation, RouteError> {
        let matched = self
            .table
            .resolve(location)
            .ok_or_else(|| RouteError::NotFound(location.to_string()))?;

        if matched.route.guarded {
            if let Admission::Deny { redirect_to } = self.admission.admit().await {
                return Ok(Navigation::Redirected { to: redirect_to });
            }
        }

        debug!(route = matched.route.pattern, "Navigated to {location}");
        self.admission.navigator().navigate_to(location);
        Ok(Navigation::Entered(matched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admission::{LANDING_ROUTE, NavigationHistory};
    use crate::readiness::ReadinessGate;
    use crate::session::SessionStore;
    use crate::tests::TestToken;
    use std::sync::Arc;

    fn router() -> (SessionStore, ReadinessGate, NavigationHistory, Router) {
        let session = SessionStore::new();
        let readiness = ReadinessGate::new();
        let history = NavigationHistory::new();
        let admission =
            RouteAdmission::new(session.clone(), readiness.clone(), Arc::new(history.clone()));
        (
            session,
            readiness,
            history,
            Router::new(RouteTable::videoflix(), admission),
        )
    }

    #[test]
    fn test_resolve_static_and_param_routes() {
        let table = RouteTable::videoflix();

        let home = table.resolve("/home").unwrap();
        assert!(home.route.guarded);

        let root = table.resolve("/").unwrap();
        assert_eq!(root.route.pattern, "/");

        let movie = table.resolve("/movie/17").unwrap();
        assert_eq!(movie.route.pattern, "/movie/:id");
        assert_eq!(movie.param("id"), Some("17"));

        let verify = table.resolve("/email-verify?token=abc").unwrap();
        assert!(!verify.route.guarded);
        assert_eq!(verify.path, "/email-verify");
    }

    #[test]
    fn test_resolve_unknown() {
        let table = RouteTable::videoflix();
        assert!(table.resolve("/movie").is_none());
        assert!(table.resolve("/movie/1/extra").is_none());
        assert!(table.resolve("/admin").is_none());
    }

    #[tokio::test]
    async fn test_public_route_skips_admission() {
        let (_session, _readiness, history, router) = router();

        // Readiness never fires; public routes must not wait for it.
        let nav = router.navigate("/login").await.unwrap();
        assert!(matches!(nav, Navigation::Entered(_)));
        assert_eq!(history.current().as_deref(), Some("/login"));
    }

    #[tokio::test]
    async fn test_guarded_route_redirects_to_landing() {
        let (_session, readiness, history, router) = router();
        readiness.mark_ready();

        let nav = router.navigate("/home").await.unwrap();
        assert_eq!(
            nav,
            Navigation::Redirected {
                to: LANDING_ROUTE.to_string()
            }
        );
        assert_eq!(history.entries(), vec![LANDING_ROUTE.to_string()]);
    }

    #[tokio::test]
    async fn test_guarded_route_entered_when_authenticated() {
        let (session, readiness, history, router) = router();
        session.set_credential(TestToken::new(5).encode());
        readiness.mark_ready();

        let nav = router.navigate("/movie/3").await.unwrap();
        let Navigation::Entered(matched) = nav else {
            panic!("expected entered navigation");
        };
        assert_eq!(matched.param("id"), Some("3"));
        assert_eq!(history.current().as_deref(), Some("/movie/3"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_error() {
        let (_session, _readiness, _history, router) = router();
        assert_eq!(
            router.navigate("/nope").await,
            Err(RouteError::NotFound("/nope".to_string()))
        );
    }
}
