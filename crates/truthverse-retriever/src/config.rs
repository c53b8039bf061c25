//! Configuration for the hybrid retriever

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the lexical and dense ranked lists are merged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FusionStrategy {
    /// Weighted sum of max-normalised relevance scores
    Weighted {
        /// Weight of the lexical list
        lexical_weight: f64,
        /// Weight of the dense list
        dense_weight: f64,
    },
    /// Reciprocal rank fusion: Σ 1 / (k + rank)
    ReciprocalRank {
        /// Rank offset; larger values flatten the contribution of top ranks
        k: f64,
    },
}

impl Default for FusionStrategy {
    fn default() -> Self {
        FusionStrategy::Weighted {
            lexical_weight: 0.6,
            dense_weight: 0.4,
        }
    }
}

/// Configuration for the hybrid retriever
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    /// Maximum time for a single backend search call (milliseconds)
    pub search_timeout_ms: u64,

    /// Fusion strategy applied when both paths return results
    #[serde(default)]
    pub fusion: FusionStrategy,
}

impl RetrieverConfig {
    /// Get the search timeout as a Duration
    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.search_timeout_ms == 0 {
            return Err("search_timeout_ms must be greater than 0".to_string());
        }
        match self.fusion {
            FusionStrategy::Weighted {
                lexical_weight,
                dense_weight,
            } => {
                let valid = |w: f64| w.is_finite() && w >= 0.0;
                if !valid(lexical_weight) || !valid(dense_weight) {
                    return Err("fusion weights must be finite and non-negative".to_string());
                }
                if lexical_weight + dense_weight == 0.0 {
                    return Err("fusion weights cannot both be zero".to_string());
                }
            }
            FusionStrategy::ReciprocalRank { k } => {
                if !k.is_finite() || k < 0.0 {
                    return Err("reciprocal rank k must be finite and non-negative".to_string());
                }
            }
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

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            search_timeout_ms: 5_000,
            fusion: FusionStrategy::default(),
        }
    }
}
