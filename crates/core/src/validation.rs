//! Configuration and form validation support

use crate::error::ValidationError;
use config::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Trait for validating configuration values
pub trait ValidateConfig: Serialize + for<'de> Deserialize<'de> {
    /// Validate the configuration
    ///
    /// Returns Ok(()) if valid, or an error describing what's wrong
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Common configuration validation helpers
pub mod validators {
    use config::ConfigError;

    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::Message(format!("{field}: cannot be empty")));
        }
        Ok(())
    }

    /// Validate URL format
    pub fn validate_url(url: &str, field: &str) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ConfigError::Message(format!("{field}: invalid URL - {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "{field}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        Ok(())
    }

    /// Validate that a numeric value lies within `min..=max`
    pub fn validate_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ConfigError>
    where
        T: PartialOrd + std::fmt::Display,
    {
        if value < min || value > max {
            return Err(ConfigError::Message(format!(
                "{field}: must be between {min} and {max}"
            )));
        }
        Ok(())
    }

    /// Validate an application route path
    pub fn validate_route(route: &str, field: &str) -> Result<(), ConfigError> {
        if !route.starts_with('/') {
            return Err(ConfigError::Message(format!(
                "{field}: route must start with '/'"
            )));
        }
        Ok(())
    }
}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
        .expect("valid email pattern")
});

/// Form field rules applied before auth requests are sent
pub mod forms {
    use super::{EMAIL_PATTERN, ValidationError};

    /// Reject empty or whitespace-only values
    pub fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Required { field });
        }
        Ok(())
    }

    /// Required, syntactically valid email address
    pub fn email(value: &str, field: &'static str) -> Result<(), ValidationError> {
        required(value, field)?;
        if !EMAIL_PATTERN.is_match(value) {
            return Err(ValidationError::InvalidEmail { field });
        }
        Ok(())
    }

    /// Required password with at least one uppercase letter and one digit
    pub fn password(value: &str, field: &'static str) -> Result<(), ValidationError> {
        required(value, field)?;
        let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = value.chars().any(|c| c.is_ascii_digit());
        if !(has_upper && has_digit) {
            return Err(ValidationError::WeakPassword { field });
        }
        Ok(())
    }

    /// Password and its confirmation must be identical
    pub fn passwords_match(password: &str, confirm: &str) -> Result<(), ValidationError> {
        if password != confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}
