use crate::client::core::ChatClient;
use crate::config::ClientConfig;
use crate::Result;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Starts from the environment (see [`ClientConfig::from_env`]); explicit
/// setters win.
pub struct ChatClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ChatClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
        }
    }

    /// Override the server base URL (e.g. a mock server in tests).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-request timeout. A timed-out request fails with a transport error.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ChatClient> {
        let mut config = ClientConfig::from_env();
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        ChatClient::new(config)
    }
}

impl Default for ChatClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let client = ChatClientBuilder::new()
            .base_url("http://127.0.0.1:9999")
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(client.config().base_url, "http://127.0.0.1:9999");
        assert_eq!(client.config().timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_bad_base_url_fails_build() {
        let err = ChatClientBuilder::new().base_url("::nope::").build().unwrap_err();
        assert!(matches!(err, crate::Error::Configuration { .. }));
    }
}
