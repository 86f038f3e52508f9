//! # Configuration Module
//!
//! Client configuration with serde support and fail-fast validation.
//!
//! ## Key Features
//! - JSON/TOML-friendly parsing with serde and humantime durations
//! - Sensible defaults for the public Hypixel endpoint
//! - Validation with detailed error messages before any request is made

use crate::core::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default upstream endpoint for all non-absolute request paths
pub const DEFAULT_BASE_URL: &str = "https://api.hypixel.net";

/// Default resolver for username/UUID lookups
pub const DEFAULT_LOOKUP_URL: &str = "https://api.minetools.eu/uuid";

/// Main client configuration structure
///
/// All durations deserialize from humantime strings ("5m", "60s", "300000ms"),
/// so a config file can express the cache window either way. Internally the
/// cache TTL is millisecond-granular.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL prepended to relative request paths
    pub base_url: String,

    /// Endpoint of the username/UUID resolver
    pub lookup_url: String,

    /// How long a successful response stays servable from the cache
    #[serde(with = "humantime_serde")]
    pub cache_ttl: Duration,

    /// Delay applied when the upstream rate-limits without a `Retry-After`
    #[serde(with = "humantime_serde")]
    pub retry_after_fallback: Duration,

    /// Safety margin added on top of every rate-limit delay
    #[serde(with = "humantime_serde")]
    pub retry_safety_margin: Duration,

    /// Value of the `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            cache_ttl: Duration::from_millis(300_000),
            retry_after_fallback: Duration::from_secs(60),
            retry_safety_margin: Duration::from_secs(1),
            user_agent: concat!("hypixel-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Validate the configuration, failing fast with a descriptive error
    pub fn validate(&self) -> ClientResult<()> {
        for (name, value) in [("base URL", &self.base_url), ("lookup URL", &self.lookup_url)] {
            let url = Url::parse(value)
                .map_err(|e| ClientError::config(format!("Invalid {name} '{value}': {e}")))?;

            if !matches!(url.scheme(), "http" | "https") {
                return Err(ClientError::config(format!(
                    "Unsupported {name} scheme '{}'",
                    url.scheme()
                )));
            }
        }

        if self.cache_ttl.is_zero() {
            return Err(ClientError::config("Cache TTL must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        config.validate().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        // The cache window defaults to 300 000 milliseconds.
        assert_eq!(config.cache_ttl, Duration::from_millis(300_000));
        assert_eq!(config.retry_after_fallback, Duration::from_secs(60));
        assert_eq!(config.retry_safety_margin, Duration::from_secs(1));
    }

    #[test]
    fn rejects_bad_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ClientError::Configuration { .. })
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = ClientConfig {
            base_url: "ftp://api.hypixel.net".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_ttl() {
        let config = ClientConfig {
            cache_ttl: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn roundtrips_through_serde() {
        let config = ClientConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cache_ttl, config.cache_ttl);
        assert_eq!(parsed.base_url, config.base_url);
    }
}
