//! API endpoint configuration.

use thiserror::Error;
use url::Url;

/// Production Crustdata API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.crustdata.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Where previewed requests would be sent.
///
/// The base URL is validated once here; the request builder treats it as
/// infallible input afterwards.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Build a config with an explicit base URL.
    ///
    /// A trailing `/` is trimmed so path joining stays uniform.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, uses a non-`http(s)` scheme,
    /// or has no host.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let parsed = Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw,
                reason: format!("unsupported scheme '{scheme}'"),
            });
        }
        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw,
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
