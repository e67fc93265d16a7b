//! Videoflix HTTP layer
//!
//! A reqwest-based API client with an ordered middleware chain, the token
//! refresh gateway that keeps the bearer credential fresh, the auth service
//! wrapping the account endpoints, and the startup bootstrapper that restores
//! a cookie-backed session and publishes auth readiness.

#[macro_use]
extern crate tracing;

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod context;
pub mod services;
pub mod types;

pub use bootstrap::AuthBootstrapper;
pub use client::error::ClientError;
pub use client::{ApiUrls, Middleware, Next, TokenRefreshGateway, VideoflixClient};
pub use config::ClientConfig;
pub use context::ClientContext;
pub use services::AuthService;
