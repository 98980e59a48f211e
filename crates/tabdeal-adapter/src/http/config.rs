/*
[INPUT]:  Defaults, environment variables or a deserialized host config section
[OUTPUT]: Immutable client configuration (endpoint, version, credentials, timeouts)
[POS]:    HTTP layer - client configuration
[UPDATE]: When adding connection options or configuration sources
*/

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Base URL for the Tabdeal API
pub const DEFAULT_BASE_URL: &str = "https://api1.tabdeal.org";
/// API version path segment
pub const DEFAULT_VERSION: &str = "v1";

pub const ENV_API_KEY: &str = "TABDEAL_API_KEY";
pub const ENV_API_SECRET: &str = "TABDEAL_API_SECRET";
pub const ENV_BASE_URL: &str = "TABDEAL_BASE_URL";
pub const ENV_API_VERSION: &str = "TABDEAL_API_VERSION";

/// HTTP client configuration.
///
/// Timeouts are given in seconds when deserialized:
///
/// ```yaml
/// base_url: https://api1.tabdeal.org
/// api_key: ...
/// api_secret: ...
/// timeout: 15
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default = "default_timeout", deserialize_with = "deserialize_secs")]
    pub timeout: Duration,
    #[serde(
        default = "default_connect_timeout",
        deserialize_with = "deserialize_secs"
    )]
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            version: default_version(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from `TABDEAL_*` environment variables,
    /// falling back to defaults for anything unset
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_key) = std::env::var(ENV_API_KEY) {
            config.api_key = api_key;
        }
        if let Ok(api_secret) = std::env::var(ENV_API_SECRET) {
            config.api_secret = api_secret;
        }
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Ok(version) = std::env::var(ENV_API_VERSION) {
            config.version = version;
        }
        config
    }

    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.api_key = api_key.into();
        self.api_secret = api_secret.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether both halves of the credential pair are set
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() { "" } else { "<redacted>" }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn deserialize_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}
