//! Configuration for the verification orchestrator

use serde::{Deserialize, Serialize};
use std::time::Duration;
use truthverse_domain::ScoreThresholds;

/// Work bounds and scoring thresholds of one verification request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Claims verified per request
    pub max_claims_per_request: usize,

    /// Claims requested from the extractor (may exceed the per-request cap)
    pub extraction_max_claims: usize,

    /// Snippets retrieved per claim
    pub evidence_top_k: usize,

    /// Snippets classified per claim, taken from the top of the retrieval
    pub max_stance_checks: usize,

    /// Evidence items attached to each verdict
    pub max_evidence_in_result: usize,

    /// Budget for one document fetch in URL mode (milliseconds)
    pub fetch_timeout_ms: u64,

    /// Label thresholds
    pub thresholds: ScoreThresholds,
}

impl VerifierConfig {
    /// Get the fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.extraction_max_claims < self.max_claims_per_request {
            return Err(
                "extraction_max_claims must be at least max_claims_per_request".to_string(),
            );
        }
        if self.max_stance_checks > self.evidence_top_k {
            return Err("max_stance_checks must not exceed evidence_top_k".to_string());
        }
        if self.fetch_timeout_ms == 0 {
            return Err("fetch_timeout_ms must be greater than 0".to_string());
        }
        self.thresholds.validate()
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

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_claims_per_request: 5,
            extraction_max_claims: 10,
            evidence_top_k: 20,
            max_stance_checks: 10,
            max_evidence_in_result: 5,
            fetch_timeout_ms: 10_000,
            thresholds: ScoreThresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VerifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_claims_per_request, 5);
        assert_eq!(config.evidence_top_k, 20);
        assert_eq!(config.max_stance_checks, 10);
        assert_eq!(config.thresholds.verified_min, 70.0);
    }

    #[test]
    fn test_invalid_bounds() {
        let config = VerifierConfig {
            max_stance_checks: 30,
            ..VerifierConfig::default()
        };
        assert!(config.validate().is_err());

        let config = VerifierConfig {
            extraction_max_claims: 2,
            ..VerifierConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_thresholds() {
        let config = VerifierConfig {
            thresholds: ScoreThresholds::new(30.0, 60.0),
            ..VerifierConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config = VerifierConfig::from_toml(
            "max_claims_per_request = 3\n\n[thresholds]\nverified_min = 80.0\n",
        )
        .unwrap();
        assert_eq!(config.max_claims_per_request, 3);
        assert_eq!(config.thresholds.verified_min, 80.0);
        assert_eq!(config.thresholds.fake_max, 40.0);
        assert_eq!(config.evidence_top_k, 20);
    }
}
