//! Client configuration

use ::config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use videoflix_core::validation::validators;
use videoflix_core::{LANDING_ROUTE, LOGIN_ROUTE, ValidateConfig};

const ENV_PREFIX: &str = "VIDEOFLIX";

/// Complete client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Session and navigation settings
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `api/...` endpoint paths are joined to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent header; the client default is used when unset
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Session and navigation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Where denied navigations are redirected
    #[serde(default = "default_landing_route")]
    pub landing_route: String,
    /// Sign-in page route
    #[serde(default = "default_login_route")]
    pub login_route: String,
    /// Share one refresh exchange between concurrently failing requests
    #[serde(default)]
    pub coalesce_refresh: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            landing_route: default_landing_route(),
            login_route: default_login_route(),
            coalesce_refresh: false,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_landing_route() -> String {
    LANDING_ROUTE.to_string()
}

fn default_login_route() -> String {
    LOGIN_ROUTE.to_string()
}

impl ClientConfig {
    /// Load configuration from defaults and the environment
    ///
    /// Nested keys use `__`, e.g. `VIDEOFLIX_API__BASE_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Load configuration from a TOML file, overridable from the environment
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()))
    }

    fn build(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl ValidateConfig for ClientConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validators::validate_url(&self.api.base_url, "api.base_url")?;
        validators::validate_range(self.api.timeout_secs, 1, 600, "api.timeout_secs")?;
        if let Some(agent) = &self.api.user_agent {
            validators::validate_not_empty(agent, "api.user_agent")?;
        }
        validators::validate_route(&self.auth.landing_route, "auth.landing_route")?;
        validators::validate_route(&self.auth.login_route, "auth.login_route")?;
        Ok(())
    }
}
