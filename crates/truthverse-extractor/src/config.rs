//! Configuration for the claim extractor

use serde::{Deserialize, Serialize};

/// Configuration for the claim extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Characters of input scanned for claims; the rest is ignored
    pub max_text_length: usize,

    /// Sentence fragments with this many characters or fewer are discarded
    pub min_sentence_chars: usize,

    /// Case-sensitive entity tokens that mark a sentence as a claim
    #[serde(default = "default_salient_entities")]
    pub salient_entities: Vec<String>,
}

fn default_salient_entities() -> Vec<String> {
    ["COVID", "WHO", "FDA", "UN"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.min_sentence_chars >= self.max_text_length {
            return Err("min_sentence_chars must be below max_text_length".to_string());
        }
        if self.salient_entities.iter().any(|e| e.trim().is_empty()) {
            return Err("salient_entities must not contain empty tokens".to_string());
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

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            min_sentence_chars: 20,
            salient_entities: default_salient_entities(),
        }
    }
}
