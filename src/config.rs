//! Client configuration: base endpoint, HTTP timeout and connection pool size.
//!
//! Values come from the environment (`CHATBOT_API_URL`,
//! `CHATBOT_HTTP_TIMEOUT_SECS`, `CHATBOT_HTTP_POOL_MAX_IDLE_PER_HOST`) and can
//! be overridden through [`crate::ChatClientBuilder`].

use crate::{Error, ErrorContext, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const API_URL_ENV: &str = "CHATBOT_API_URL";
pub const TIMEOUT_ENV: &str = "CHATBOT_HTTP_TIMEOUT_SECS";
pub const POOL_MAX_IDLE_ENV: &str = "CHATBOT_HTTP_POOL_MAX_IDLE_PER_HOST";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 8;

/// Path segments every chatbot endpoint lives under (`/api/chatbot`).
pub const API_PREFIX: [&str; 2] = ["api", "chatbot"];

/// Fixed transport configuration of a [`crate::ChatClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Idle keep-alive connections kept per host.
    pub pool_max_idle_per_host: usize,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
        }
    }

    /// Read configuration from the environment, falling back to the local
    /// development server.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let pool_max_idle_per_host = env::var(POOL_MAX_IDLE_ENV)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_POOL_MAX_IDLE_PER_HOST);

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs.max(1)),
            pool_max_idle_per_host,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve `<base>/api/chatbot`, validating the base URL.
    ///
    /// Any query string or fragment on the base URL is dropped.
    pub fn api_root_url(&self) -> Result<Url> {
        let invalid = |details: String| {
            Error::configuration_with_context(
                format!("invalid base URL '{}'", self.base_url),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details(details)
                    .with_source("config"),
            )
        };

        let mut url = Url::parse(self.base_url.trim()).map_err(|e| invalid(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                format!("unsupported URL scheme '{}'", url.scheme()),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details("expected http or https")
                    .with_source("config"),
            ));
        }

        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(API_PREFIX);
        Ok(url)
    }

    /// [`Self::api_root_url`] as a string.
    pub fn api_root(&self) -> Result<String> {
        self.api_root_url().map(String::from)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_root_appends_prefix() {
        let cfg = ClientConfig::new("http://localhost:8000");
        assert_eq!(cfg.api_root().unwrap(), "http://localhost:8000/api/chatbot");
    }

    #[test]
    fn test_api_root_trims_trailing_slash() {
        let cfg = ClientConfig::new("https://chat.example.com/");
        assert_eq!(
            cfg.api_root().unwrap(),
            "https://chat.example.com/api/chatbot"
        );
    }

    #[test]
    fn test_api_root_keeps_base_path() {
        let cfg = ClientConfig::new("https://example.com/backend/");
        assert_eq!(
            cfg.api_root().unwrap(),
            "https://example.com/backend/api/chatbot"
        );
    }

    #[test]
    fn test_api_root_drops_query_and_fragment() {
        let cfg = ClientConfig::new("http://h/?x=1");
        assert_eq!(cfg.api_root().unwrap(), "http://h/api/chatbot");

        let cfg = ClientConfig::new("https://example.com/base#top");
        assert_eq!(cfg.api_root().unwrap(), "https://example.com/base/api/chatbot");
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let err = ClientConfig::new("not a url").api_root().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("config.base_url")
        );
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = ClientConfig::new("ftp://example.com").api_root().unwrap_err();
        assert!(err.to_string().contains("unsupported URL scheme"));
    }

    #[test]
    fn test_default_points_at_local_server() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cfg.pool_max_idle_per_host, DEFAULT_POOL_MAX_IDLE_PER_HOST);
    }

    #[test]
    fn test_with_timeout_overrides_default() {
        let cfg = ClientConfig::new("http://localhost:8000").with_timeout(Duration::from_millis(250));
        assert_eq!(cfg.timeout, Duration::from_millis(250));
    }
}
