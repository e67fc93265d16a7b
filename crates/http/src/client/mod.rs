//! Videoflix HTTP client

pub mod auth;
pub mod error;
pub mod gateway;
pub mod middleware;
pub mod movies;
pub mod urls;

pub use error::ClientError;
pub use gateway::TokenRefreshGateway;
pub use middleware::{Middleware, Next};
pub use urls::ApiUrls;

use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("videoflix-client/", env!("CARGO_PKG_VERSION"));

/// Videoflix API client
///
/// Every request built by [`request`](Self::request) and sent through
/// [`send`](Self::send) passes the registered middleware in order. The
/// underlying reqwest client keeps a cookie store, so the backend's session
/// cookie accompanies every call.
#[derive(Clone)]
pub struct VideoflixClient {
    client: Client,
    urls: ApiUrls,
    middleware: Arc<[Arc<dyn Middleware>]>,
}

impl VideoflixClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> VideoflixClientBuilder {
        VideoflixClientBuilder::default()
    }

    /// Endpoint URLs
    pub fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.urls.base().as_str()
    }

    /// Create a request builder for an absolute endpoint URL
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request through the middleware chain
    ///
    /// Non-success statuses become [`ClientError`]s carrying the response body.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let response = Next::new(&self.client, &self.middleware).run(request).await?;
        let status = response.status();

        if status.is_success() {
            trace!(%method, %url, status = status.as_u16(), "Request succeeded");
            Ok(response)
        } else {
            debug!(%method, %url, status = status.as_u16(), "Request failed");
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    /// Execute a request and decode the JSON response
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        Ok(self.send(request).await?.json().await?)
    }

    /// Execute a request whose response body may be empty
    pub async fn execute_optional<T: DeserializeOwned + Default>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let body = self.send(request).await?.text().await?;
        if body.trim().is_empty() {
            Ok(T::default())
        } else {
            Ok(serde_json::from_str(&body)?)
        }
    }
}

/// Builder for VideoflixClient
#[derive(Default)]
pub struct VideoflixClientBuilder {
    base_url: Option<String>,
    urls: Option<ApiUrls>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl VideoflixClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Use already parsed endpoint URLs
    pub fn urls(mut self, urls: ApiUrls) -> Self {
        self.urls = Some(urls);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Append a middleware; earlier registrations run first
    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Build the client
    pub fn build(self) -> Result<VideoflixClient, ClientError> {
        let urls = match (self.urls, self.base_url) {
            (Some(urls), _) => urls,
            (None, Some(base_url)) => ApiUrls::new(&base_url)?,
            (None, None) => {
                return Err(ClientError::Configuration("base_url is required".into()));
            }
        };

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        {
            client_builder = client_builder.cookie_store(true);
            if let Some(timeout) = self.timeout {
                client_builder = client_builder.timeout(timeout);
            }
        }

        client_builder = client_builder
            .user_agent(self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()));

        let client = client_builder.build()?;

        Ok(VideoflixClient {
            client,
            urls,
            middleware: self.middleware.into(),
        })
    }
}
