//! Configuration for the Admin API client.

use std::path::Path;
use std::time::Duration;

use qr_admin_core::GenericResultExt;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Admin API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-10";

/// Configuration for the [`AdminClient`](crate::AdminClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminApiConfig {
    /// Shop domain, e.g. `demo.myshopify.com`.
    #[serde(default)]
    pub shop: String,

    /// Admin API version segment of the endpoint path.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Access token issued to the app for this shop.
    #[serde(default)]
    pub access_token: String,

    /// Full endpoint override (proxies, tests).
    #[serde(default)]
    pub endpoint: Option<Url>,

    /// Timeout for each request.
    #[serde(with = "duration_secs", default = "default_timeout")]
    pub timeout: Duration,
}

impl Default for AdminApiConfig {
    fn default() -> Self {
        Self {
            shop: String::new(),
            api_version: default_api_version(),
            access_token: String::new(),
            endpoint: None,
            timeout: default_timeout(),
        }
    }
}

impl AdminApiConfig {
    /// Create a config for a shop and access token.
    pub fn new(shop: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    /// Set the API version.
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Override the endpoint URL.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The GraphQL endpoint requests are posted to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`] if the shop domain does not form a valid URL.
    pub fn graphql_url(&self) -> Result<Url> {
        if let Some(ref endpoint) = self.endpoint {
            return Ok(endpoint.clone());
        }
        let url = format!(
            "https://{}/admin/api/{}/graphql.json",
            self.shop, self.api_version
        );
        Ok(url.parse()?)
    }

    /// Check that the config can be used to build a client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the shop, token, or version is
    /// missing, or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.shop.trim().is_empty() && self.endpoint.is_none() {
            return Err(Error::config_error("no shop domain or endpoint configured"));
        }
        if self.access_token.trim().is_empty() {
            return Err(Error::config_error("no access token configured"));
        }
        if self.api_version.trim().is_empty() {
            return Err(Error::config_error("API version must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(Error::config_error("timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables keep their defaults; unparsable ones are logged and
    /// ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(shop) = std::env::var("QR_ADMIN_SHOP") {
            config.shop = shop;
        }

        if let Ok(token) = std::env::var("QR_ADMIN_ACCESS_TOKEN") {
            config.access_token = token;
        }

        if let Ok(version) = std::env::var("QR_ADMIN_API_VERSION") {
            config.api_version = version;
        }

        if let Ok(url) = std::env::var("QR_ADMIN_ENDPOINT") {
            config.endpoint = endpoint_override(&url);
        }

        if let Ok(secs) = std::env::var("QR_ADMIN_TIMEOUT_SECS") {
            config.timeout = secs
                .parse()
                .map(Duration::from_secs)
                .or_default_logged(config.timeout);
        }

        config
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        // JSON by extension, TOML otherwise
        if path.extension().is_some_and(|e| e == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            toml::from_str(&content)
                .map_err(|e| Error::config_error(format!("Failed to parse config: {e}")))
        }
    }
}

/// Parse an endpoint override; a malformed URL is logged and ignored.
fn endpoint_override(raw: &str) -> Option<Url> {
    raw.parse::<Url>().map(Some).or_default_logged(None)
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Serialization helper for Duration as seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
