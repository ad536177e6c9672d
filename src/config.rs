//! Configuration types for listfeed

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default feed endpoint
pub const DEFAULT_ENDPOINT: &str = "https://fetch-hiring.s3.amazonaws.com/hiring.json";

/// Top-level configuration
///
/// Works out of the box: `Config::default()` points at the hosted feed with
/// a 5-second retry delay. Constructed in code by the embedding application;
/// there is no config file, CLI, or environment lookup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Feed URL to fetch (default: the hosted item feed)
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,

    /// Retry behavior of the fetch loop
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    /// Returns a `Config` error naming the offending key if the endpoint
    /// scheme is not HTTP(S) or the retry delay is zero.
    pub fn validate(&self) -> Result<()> {
        match self.endpoint.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Config {
                    message: format!("unsupported endpoint scheme `{other}`"),
                    key: Some("endpoint".to_string()),
                });
            }
        }

        if self.retry.delay.is_zero() {
            return Err(Error::Config {
                message: "retry delay must be non-zero".to_string(),
                key: Some("retry.delay".to_string()),
            });
        }

        Ok(())
    }
}

/// Retry behavior: a constant delay between attempts, retried indefinitely
///
/// There is deliberately no attempt cap and no backoff growth: the loop
/// keeps trying at a fixed cadence until a fetch succeeds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Fixed delay between attempts (default: 5 seconds)
    #[serde(default = "default_delay", with = "duration_serde")]
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            delay: default_delay(),
        }
    }
}

// The constant is a known-valid URL; a parse failure here is a bug
#[allow(clippy::expect_used)]
fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
}

fn default_delay() -> Duration {
    Duration::from_secs(5)
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_hosted_feed() {
        let config = Config::default();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.retry.delay, Duration::from_secs(5));
        config.validate().unwrap();
    }

    #[test]
    fn deserializes_with_field_defaults() {
        let config: Config = serde_json::from_str(r#"{"retry": {"delay": 7}}"#).unwrap();
        assert_eq!(config.retry.delay, Duration::from_secs(7));
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);

        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.retry.delay, Duration::from_secs(5));
    }

    #[test]
    fn serializes_delay_as_seconds() {
        let value = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(value["retry"]["delay"], 5);
        assert_eq!(value["endpoint"], DEFAULT_ENDPOINT);
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let config = Config {
            endpoint: Url::parse("ftp://example.com/feed.json").unwrap(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("endpoint")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_zero_delay() {
        let config = Config {
            retry: RetryConfig {
                delay: Duration::ZERO,
            },
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("retry.delay")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
