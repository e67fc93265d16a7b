//! Service layer for authentication flows

pub mod auth;

pub use auth::{AuthService, VERIFICATION_FAILED_MESSAGE};
