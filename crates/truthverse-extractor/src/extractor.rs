//! Core ClaimExtractor implementation

use crate::canonical::{canonical_hash, canonicalize};
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::patterns::ClaimPatterns;
use crate::sentences::split_sentences;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use truthverse_domain::{Claim, ClaimId};

/// The ClaimExtractor converts unstructured text into candidate claims
#[derive(Debug, Clone)]
pub struct ClaimExtractor {
    config: ExtractorConfig,
    patterns: ClaimPatterns,
}

impl ClaimExtractor {
    /// Create a new ClaimExtractor, validating the configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let patterns = ClaimPatterns::new(&config.salient_entities)?;
        Ok(Self { config, patterns })
    }

    /// Create an extractor with the default configuration
    pub fn default_config() -> Result<Self, ExtractorError> {
        Self::new(ExtractorConfig::default())
    }

    /// Get the extractor configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract at most `max_claims` claims from `text`, in order of first
    /// appearance
    ///
    /// Sentences whose canonical form repeats an earlier claim are skipped.
    /// Text with no claim-like sentence yields an empty list. Only the first
    /// `max_text_length` characters are scanned.
    pub fn extract(&self, text: &str, max_claims: usize) -> Result<Vec<Claim>, ExtractorError> {
        let length = text.chars().count();
        let window = scan_window(text, self.config.max_text_length);
        if window.len() < text.len() {
            warn!(
                "Text has {} chars; scanning the first {} for claims",
                length, self.config.max_text_length
            );
        }

        let sentences = split_sentences(window, self.config.min_sentence_chars);
        debug!("Split text into {} candidate sentences", sentences.len());

        let mut claims = Vec::new();
        let mut seen = HashSet::new();

        for sentence in sentences {
            if claims.len() >= max_claims {
                break;
            }
            if !self.patterns.is_potential_claim(&sentence) {
                continue;
            }

            let canonical_text = canonicalize(&sentence);
            if !seen.insert(canonical_text.clone()) {
                debug!("Skipping repeated sentence: {}", canonical_text);
                continue;
            }

            let id = ClaimId::from_digest(canonical_hash(&sentence));
            claims.push(Claim::new(id, sentence, canonical_text));
        }

        info!(
            "Extracted {} claims from {} chars (limit {})",
            claims.len(),
            length,
            max_claims
        );

        Ok(claims)
    }
}

/// The prefix of `text` holding at most `max_chars` characters.
fn scan_window(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_window() {
        assert_eq!(scan_window("abcdef", 3), "abc");
        assert_eq!(scan_window("abc", 10), "abc");
        assert_eq!(scan_window("héllo", 2), "hé");
    }
}
