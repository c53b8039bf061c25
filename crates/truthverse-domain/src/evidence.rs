//! Evidence snippets and stance judgments

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trust assigned to a snippet whose source has no recorded trust score
pub const DEFAULT_SOURCE_TRUST: f64 = 0.5;

/// One retrieved unit of text associated with a claim query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSnippet {
    /// Stable identifier of the snippet within its backend
    pub snippet_id: String,

    /// Snippet text
    pub text: String,

    /// Identifier of the originating document
    pub document_id: Option<String>,

    /// Identifier of the source (publisher) the document came from
    pub source_id: Option<String>,

    /// Human-readable source name
    pub source_name: String,

    /// Source domain (e.g. "reuters.com")
    pub source_domain: Option<String>,

    /// URL of the originating document
    pub url: Option<String>,

    /// Source trust in [0.0, 1.0]
    pub source_trust: f64,

    /// Retrieval relevance; used for ordering only, never for scoring
    pub relevance: f64,
}

impl EvidenceSnippet {
    /// Identifier used when counting distinct consulted sources
    ///
    /// Falls back to the domain, then the source name, when the backend does
    /// not report a source id.
    pub fn source_key(&self) -> &str {
        self.source_id
            .as_deref()
            .or(self.source_domain.as_deref())
            .unwrap_or(&self.source_name)
    }
}

/// Relationship of an evidence snippet to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    /// Evidence supports the claim
    Support,
    /// Evidence contradicts the claim
    Contradict,
    /// Evidence neither supports nor contradicts
    Neutral,
}

impl Stance {
    /// Map a raw inference label onto the three-way taxonomy
    ///
    /// Labels containing "entailment" or "support" map to support, labels
    /// containing "contradiction" or "contradict" map to contradict, and
    /// everything else is neutral. Matching is case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use truthverse_domain::Stance;
    ///
    /// assert_eq!(Stance::from_label("ENTAILMENT"), Stance::Support);
    /// assert_eq!(Stance::from_label("contradiction"), Stance::Contradict);
    /// assert_eq!(Stance::from_label("LABEL_1"), Stance::Neutral);
    /// ```
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("entailment") || label.contains("support") {
            Stance::Support
        } else if label.contains("contradict") {
            Stance::Contradict
        } else {
            Stance::Neutral
        }
    }

    /// Lowercase name used in wire formats
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Support => "support",
            Stance::Contradict => "contradict",
            Stance::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one (claim, snippet) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StanceJudgment {
    /// Exactly one of support / contradict / neutral
    pub stance: Stance,

    /// Confidence in [0.0, 1.0]
    pub confidence: f64,

    /// Templated human-readable rationale
    pub explanation: String,
}

impl StanceJudgment {
    /// Create a judgment, clamping confidence into [0, 1]
    ///
    /// A NaN confidence becomes 0.0.
    pub fn new(stance: Stance, confidence: f64, explanation: impl Into<String>) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            stance,
            confidence,
            explanation: explanation.into(),
        }
    }
}

/// The two numbers the aggregator needs from each piece of evidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedEvidence {
    /// Stance confidence in [0.0, 1.0]
    pub confidence: f64,
    /// Source trust in [0.0, 1.0]
    pub source_trust: f64,
}

impl WeightedEvidence {
    /// Create a new weighted evidence entry
    pub fn new(confidence: f64, source_trust: f64) -> Self {
        Self {
            confidence,
            source_trust,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet() -> EvidenceSnippet {
        EvidenceSnippet {
            snippet_id: "s1".to_string(),
            text: "Vaccines reduce hospitalisation".to_string(),
            document_id: None,
            source_id: None,
            source_name: "Example News".to_string(),
            source_domain: None,
            url: None,
            source_trust: DEFAULT_SOURCE_TRUST,
            relevance: 1.0,
        }
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(Stance::from_label("entailment"), Stance::Support);
        assert_eq!(Stance::from_label("SUPPORTS"), Stance::Support);
        assert_eq!(Stance::from_label("Contradiction"), Stance::Contradict);
        assert_eq!(Stance::from_label("contradicts"), Stance::Contradict);
        assert_eq!(Stance::from_label("neutral"), Stance::Neutral);
        assert_eq!(Stance::from_label(""), Stance::Neutral);
    }

    #[test]
    fn test_judgment_clamps_confidence() {
        assert_eq!(StanceJudgment::new(Stance::Support, 1.7, "").confidence, 1.0);
        assert_eq!(StanceJudgment::new(Stance::Support, -0.2, "").confidence, 0.0);
        assert_eq!(StanceJudgment::new(Stance::Neutral, f64::NAN, "").confidence, 0.0);
    }

    #[test]
    fn test_source_key_fallbacks() {
        let mut s = snippet();
        assert_eq!(s.source_key(), "Example News");

        s.source_domain = Some("example.com".to_string());
        assert_eq!(s.source_key(), "example.com");

        s.source_id = Some("42".to_string());
        assert_eq!(s.source_key(), "42");
    }

    #[test]
    fn test_stance_serializes_lowercase() {
        let json = serde_json::to_string(&Stance::Contradict).unwrap();
        assert_eq!(json, "\"contradict\"");
    }
}
