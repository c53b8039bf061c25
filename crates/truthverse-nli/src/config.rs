//! Configuration for stance classification

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default NLI model on the hosted inference endpoint
pub const DEFAULT_MODEL: &str = "facebook/bart-large-mnli";

/// Default hosted inference endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// Configuration for the stance classifier and its inference client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StanceConfig {
    /// Use the hosted inference model; when false the heuristic is used
    pub use_inference: bool,

    /// Model identifier
    pub model: String,

    /// Inference endpoint base URL
    pub endpoint: String,

    /// Maximum time the classifier waits for one model call (milliseconds)
    pub inference_timeout_ms: u64,

    /// HTTP request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Attempts per model call, including the first
    pub max_retries: u32,
}

impl StanceConfig {
    /// Get the inference timeout as a Duration
    pub fn inference_timeout(&self) -> Duration {
        Duration::from_millis(self.inference_timeout_ms)
    }

    /// Get the HTTP request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!("endpoint must be an http(s) URL, got '{}'", self.endpoint));
        }
        if self.inference_timeout_ms == 0 {
            return Err("inference_timeout_ms must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
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

impl Default for StanceConfig {
    fn default() -> Self {
        Self {
            use_inference: true,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            inference_timeout_ms: 10_000,
            request_timeout_secs: 30,
            max_retries: 3,
        }
    }
}
