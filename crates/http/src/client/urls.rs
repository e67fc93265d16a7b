//! Endpoint layout of the Videoflix API

use super::ClientError;
use url::Url;

const AUTH_STATUS: &str = "api/auth/status/";
const AUTH_REFRESH: &str = "api/auth/refresh/";
const AUTH_LOGIN: &str = "api/auth/login/";
const AUTH_LOGOUT: &str = "api/auth/logout/";
const AUTH_REGISTER: &str = "api/auth/register/";
const AUTH_PASSWORD_RESET: &str = "api/auth/password-reset/";
const AUTH_PASSWORD_RESET_CONFIRM: &str = "api/auth/password-reset/confirm/";
const AUTH_VERIFY_EMAIL: &str = "api/auth/verify-email/";
const MOVIES: &str = "api/movie/";

/// Absolute endpoint URLs derived from one API base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrls {
    base: Url,
}

impl ApiUrls {
    /// Parse the API base URL
    ///
    /// A missing trailing slash is added so endpoint paths append to the
    /// base path instead of replacing its last segment.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "base_url cannot be a base: {base_url}"
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("{}{path}", self.base.path()));
        url.set_query(None);
        url
    }

    pub fn status(&self) -> Url {
        self.endpoint(AUTH_STATUS)
    }

    pub fn refresh(&self) -> Url {
        self.endpoint(AUTH_REFRESH)
    }

    pub fn login(&self) -> Url {
        self.endpoint(AUTH_LOGIN)
    }

    pub fn logout(&self) -> Url {
        self.endpoint(AUTH_LOGOUT)
    }

    pub fn register(&self) -> Url {
        self.endpoint(AUTH_REGISTER)
    }

    pub fn password_reset(&self) -> Url {
        self.endpoint(AUTH_PASSWORD_RESET)
    }

    pub fn password_reset_confirm(&self) -> Url {
        self.endpoint(AUTH_PASSWORD_RESET_CONFIRM)
    }

    /// Verification link target with the token query-encoded
    pub fn verify_email(&self, token: &str) -> Url {
        let mut url = self.endpoint(AUTH_VERIFY_EMAIL);
        url.query_pairs_mut().append_pair("token", token);
        url
    }

    pub fn movies(&self) -> Url {
        self.endpoint(MOVIES)
    }

    pub fn movie(&self, id: u64) -> Url {
        self.endpoint(&format!("{MOVIES}{id}/"))
    }

    /// Whether `url` targets the refresh exchange
    pub fn is_refresh(&self, url: &Url) -> bool {
        url.path() == self.refresh().path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_from_base() {
        let urls = ApiUrls::new("https://api.example.com").unwrap();
        assert_eq!(urls.status().as_str(), "https://api.example.com/api/auth/status/");
        assert_eq!(urls.refresh().as_str(), "https://api.example.com/api/auth/refresh/");
        assert_eq!(
            urls.password_reset_confirm().as_str(),
            "https://api.example.com/api/auth/password-reset/confirm/"
        );
        assert_eq!(urls.movie(12).as_str(), "https://api.example.com/api/movie/12/");
    }

    #[test]
    fn test_base_with_path_prefix() {
        let urls = ApiUrls::new("https://example.com/videoflix").unwrap();
        assert_eq!(urls.login().as_str(), "https://example.com/videoflix/api/auth/login/");
    }

    #[test]
    fn test_base_query_is_not_carried_over() {
        let urls = ApiUrls::new("https://api.example.com/?lang=de").unwrap();
        assert_eq!(urls.status().as_str(), "https://api.example.com/api/auth/status/");
        assert_eq!(urls.verify_email("t").query(), Some("token=t"));
    }

    #[test]
    fn test_verify_email_encodes_token() {
        let urls = ApiUrls::new("https://api.example.com/").unwrap();
        let url = urls.verify_email("a/b+c=d");
        assert_eq!(url.path(), "/api/auth/verify-email/");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "token");
        assert_eq!(value, "a/b+c=d");
        assert!(!url.query().unwrap().contains('/'));
    }

    #[test]
    fn test_is_refresh() {
        let urls = ApiUrls::new("https://api.example.com/").unwrap();
        assert!(urls.is_refresh(&urls.refresh()));
        assert!(!urls.is_refresh(&urls.login()));
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            ApiUrls::new("not a url"),
            Err(ClientError::Configuration(_))
        ));
        assert!(ApiUrls::new("mailto:someone@example.com").is_err());
    }
}
