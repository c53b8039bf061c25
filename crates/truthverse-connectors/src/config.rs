//! Configuration shared by the connectors

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default NewsAPI base URL
pub const NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";

/// Default Google Fact Check Tools base URL
pub const FACTCHECK_BASE_URL: &str = "https://factchecktools.googleapis.com/v1alpha1";

/// Connector configuration
///
/// API keys are not part of this struct; they come from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// HTTP request timeout (seconds)
    pub timeout_secs: u64,

    /// Consecutive failures before a connector disables itself
    pub max_failures: u32,

    /// Cache lifetime for news responses (seconds)
    pub news_cache_ttl_secs: u64,

    /// Cache lifetime for fact-check responses (seconds)
    pub factcheck_cache_ttl_secs: u64,

    /// Maximum cached responses per connector
    pub cache_capacity: usize,

    /// Trust assigned to fact-check publishers
    pub factcheck_trust: f64,

    /// NewsAPI base URL
    pub newsapi_base_url: String,

    /// Fact Check Tools base URL
    pub factcheck_base_url: String,
}

impl ConnectorConfig {
    /// Get the HTTP timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_failures == 0 {
            return Err("max_failures must be greater than 0".to_string());
        }
        if self.cache_capacity == 0 {
            return Err("cache_capacity must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.factcheck_trust) {
            return Err("factcheck_trust must be in [0.0, 1.0]".to_string());
        }
        for base in [&self.newsapi_base_url, &self.factcheck_base_url] {
            url::Url::parse(base).map_err(|e| format!("Invalid base URL '{}': {}", base, e))?;
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_failures: 5,
            news_cache_ttl_secs: 3_600,
            factcheck_cache_ttl_secs: 86_400,
            cache_capacity: 1_024,
            factcheck_trust: 0.8,
            newsapi_base_url: NEWSAPI_BASE_URL.to_string(),
            factcheck_base_url: FACTCHECK_BASE_URL.to_string(),
        }
    }
}
