use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for a search service instance.
///
/// Applications usually embed this in their own config file; the client
/// never reads files or environment variables on its own.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://localhost:7700`
    pub host: String,

    /// Master or API key. `None` (or empty) for unprotected instances.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whole-request timeout used by the default transport
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    30_000
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("host is empty")]
    EmptyHost,

    #[error("host {0:?} must start with http:// or https://")]
    InvalidScheme(String),

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// API key to send, treating an empty string as no key.
    pub fn bearer_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Host with any trailing slashes removed
    pub fn base_url(&self) -> &str {
        self.host.trim().trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(ConfigError::InvalidScheme(host.to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
