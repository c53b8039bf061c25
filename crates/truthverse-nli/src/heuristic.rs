//! Keyword-overlap fallback and explanation templates

use std::collections::HashSet;
use truthverse_domain::{Stance, StanceJudgment};

/// Confidence reported when the heuristic finds enough overlap
pub const FALLBACK_SUPPORT_CONFIDENCE: f64 = 0.6;

/// Confidence reported otherwise
pub const FALLBACK_NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Explanation attached to every heuristic judgment
pub const FALLBACK_EXPLANATION: &str = "Fallback stance detection based on keyword overlap";

/// Classify by word overlap between claim and evidence
///
/// Both texts are lowercased and split on whitespace into word sets. More
/// than half of the claim's distinct words appearing in the evidence yields
/// support at 0.6; anything else is neutral at 0.5.
///
/// Never returns [`Stance::Contradict`]: contradiction cannot be detected
/// from overlap alone.
///
/// # Examples
///
/// ```
/// use truthverse_domain::Stance;
/// use truthverse_nli::heuristic_stance;
///
/// let judgment = heuristic_stance("coffee improves memory", "New study: coffee improves memory");
/// assert_eq!(judgment.stance, Stance::Support);
/// assert_eq!(judgment.confidence, 0.6);
/// ```
pub fn heuristic_stance(claim: &str, evidence: &str) -> StanceJudgment {
    let claim_lower = claim.to_lowercase();
    let evidence_lower = evidence.to_lowercase();

    let claim_words: HashSet<&str> = claim_lower.split_whitespace().collect();
    let evidence_words: HashSet<&str> = evidence_lower.split_whitespace().collect();
    let overlap = claim_words.intersection(&evidence_words).count();

    // overlap > |claim| / 2, compared in integers
    if overlap * 2 > claim_words.len() {
        StanceJudgment::new(Stance::Support, FALLBACK_SUPPORT_CONFIDENCE, FALLBACK_EXPLANATION)
    } else {
        StanceJudgment::new(Stance::Neutral, FALLBACK_NEUTRAL_CONFIDENCE, FALLBACK_EXPLANATION)
    }
}

/// Templated rationale for a model judgment
pub fn explain(stance: Stance, confidence: f64) -> String {
    match stance {
        Stance::Support => format!(
            "Evidence supports the claim with {:.1}% confidence",
            confidence * 100.0
        ),
        Stance::Contradict => format!(
            "Evidence contradicts the claim with {:.1}% confidence",
            confidence * 100.0
        ),
        Stance::Neutral => "Evidence is neutral to the claim".to_string(),
    }
}
