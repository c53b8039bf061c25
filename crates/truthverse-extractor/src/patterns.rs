//! Claim-signal patterns

use crate::error::ExtractorError;
use regex::{Regex, RegexSet};

/// Patterns matched against the lowercased sentence
const CLAIM_SIGNALS: &[&str] = &[
    // percentage
    r"\b\d+%",
    // large number with unit
    r"\b\d+\s+(percent|million|billion|thousand)",
    // factual-assertion verbs
    r"\b(proven|shows|demonstrates|reveals|indicates|suggests|found)\b",
    // causal / comparative verbs
    r"\b(increases|decreases|reduces|improves|causes|prevents)\b",
    // attribution
    r"\b(according to|study|research|report|data)\b",
];

/// Compiled detector deciding whether a sentence is a potential claim
#[derive(Debug, Clone)]
pub struct ClaimPatterns {
    signals: RegexSet,
    entities: Option<Regex>,
}

impl ClaimPatterns {
    /// Compile the signal patterns plus a word-bounded, case-sensitive
    /// alternation over `salient_entities`
    pub fn new(salient_entities: &[String]) -> Result<Self, ExtractorError> {
        let signals = RegexSet::new(CLAIM_SIGNALS)
            .map_err(|e| ExtractorError::Config(format!("Invalid claim pattern: {}", e)))?;

        let entities = if salient_entities.is_empty() {
            None
        } else {
            let alternation = salient_entities
                .iter()
                .map(|e| regex::escape(e.trim()))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"\b(?:{})\b", alternation);
            Some(
                Regex::new(&pattern)
                    .map_err(|e| ExtractorError::Config(format!("Invalid entity list: {}", e)))?,
            )
        };

        Ok(Self { signals, entities })
    }

    /// True if the sentence matches any claim signal or names a salient entity
    pub fn is_potential_claim(&self, sentence: &str) -> bool {
        if self.signals.is_match(&sentence.to_lowercase()) {
            return true;
        }
        self.entities
            .as_ref()
            .is_some_and(|re| re.is_match(sentence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> ClaimPatterns {
        let entities: Vec<String> = ["COVID", "WHO", "FDA", "UN"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        ClaimPatterns::new(&entities).unwrap()
    }

    #[test]
    fn test_signal_patterns() {
        let p = patterns();
        assert!(p.is_potential_claim("Study shows 95% improvement"));
        assert!(p.is_potential_claim("According to research, AI helps"));
        assert!(p.is_potential_claim("The city added 40 thousand jobs last year"));
        assert!(p.is_potential_claim("Exercise REDUCES stress in adults"));
        assert!(!p.is_potential_claim("Hello world"));
    }

    #[test]
    fn test_entities_are_case_sensitive_and_word_bounded() {
        let p = patterns();
        assert!(p.is_potential_claim("The FDA approved a new treatment"));
        assert!(p.is_potential_claim("Delegates met at the UN on Monday"));
        assert!(!p.is_potential_claim("who knows what will happen next"));
        assert!(!p.is_potential_claim("UNDERSTANDING takes time and patience"));
    }

    #[test]
    fn test_no_entities() {
        let p = ClaimPatterns::new(&[]).unwrap();
        assert!(!p.is_potential_claim("The FDA approved a new treatment"));
        assert!(p.is_potential_claim("The FDA approved 3 million doses"));
    }
}
