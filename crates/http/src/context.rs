//! Composition of the client-side auth components

use crate::bootstrap::AuthBootstrapper;
use crate::client::{ApiUrls, ClientError, TokenRefreshGateway, VideoflixClient};
use crate::config::ClientConfig;
use crate::services::AuthService;
use std::sync::Arc;
use videoflix_core::{
    NavigationHistory, ReadinessGate, RouteAdmission, RouteTable, Router, SessionStore,
};

/// Shared client state
///
/// Every component holds a handle to the same [`SessionStore`] and
/// [`ReadinessGate`], so a credential stored by the gateway is visible to
/// route admission immediately.
#[derive(Clone)]
pub struct ClientContext {
    pub config: Arc<ClientConfig>,
    pub session: SessionStore,
    pub readiness: ReadinessGate,
    pub client: VideoflixClient,
    pub auth: AuthService,
    pub history: NavigationHistory,
    pub router: Arc<Router>,
}

impl ClientContext {
    /// Wire up all components from configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let session = SessionStore::new();
        let readiness = ReadinessGate::new();
        let urls = ApiUrls::new(&config.api.base_url)?;

        let gateway = TokenRefreshGateway::new(session.clone(), urls.clone())
            .with_coalescing(config.auth.coalesce_refresh);

        let mut builder = VideoflixClient::builder()
            .urls(urls)
            .timeout(config.api.timeout())
            .middleware(gateway);
        if let Some(agent) = &config.api.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let client = builder.build()?;

        let auth = AuthService::new(client.clone(), session.clone());
        let history = NavigationHistory::new();

        let admission =
            RouteAdmission::new(session.clone(), readiness.clone(), Arc::new(history.clone()))
                .with_landing_route(config.auth.landing_route.clone());
        let router = Router::new(RouteTable::videoflix(), admission);

        Ok(Self {
            config: Arc::new(config),
            session,
            readiness,
            client,
            auth,
            history,
            router: Arc::new(router),
        })
    }

    /// A bootstrapper publishing to this context's readiness gate
    pub fn bootstrapper(&self) -> AuthBootstrapper {
        AuthBootstrapper::new(self.auth.clone(), self.readiness.clone())
    }
}
