//! Credibility score computation
//!
//! Implements the deterministic aggregation formula:
//! 1. Signed weighted sum of stance confidences
//! 2. Square-root normalisation by evidence count
//! 3. Logistic squashing onto [0, 100]
//! 4. Threshold labelling

use crate::credibility::{CredibilityScore, EvidenceBreakdown, ScoreThresholds};
use crate::evidence::WeightedEvidence;
use crate::CredibilityLabel;
use thiserror::Error;

/// Share of an item's weight that does not depend on source trust
pub const BASE_WEIGHT: f64 = 0.7;

/// Share of an item's weight scaled by source trust
pub const TRUST_WEIGHT: f64 = 0.3;

/// Score reported when no evidence exists at all
pub const NO_EVIDENCE_SCORE: f64 = 50.0;

/// Errors from malformed aggregator input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CredibilityError {
    /// Confidence or trust was non-finite or outside [0, 1]
    #[error("Invalid evidence: {field} = {value} (expected a finite value in [0, 1])")]
    InvalidEvidence {
        /// Which field was invalid
        field: &'static str,
        /// The offending value
        value: f64,
    },
}

/// Compute the credibility score of a claim from partitioned evidence
///
/// Each supporting item adds `confidence * (0.7 + 0.3 * source_trust)` to a raw
/// sum and each contradicting item subtracts the same term. Neutral items add
/// nothing but count toward `N`. The sum is divided by `sqrt(N)`, so the
/// verdict tracks average persuasiveness rather than sheer volume, then
/// squashed with a logistic function and scaled to 0-100.
///
/// The function is pure: identical inputs always produce identical outputs.
///
/// # Examples
///
/// ```
/// use truthverse_domain::{compute_credibility, CredibilityLabel, ScoreThresholds};
///
/// let score = compute_credibility(&[], &[], &[], &ScoreThresholds::default()).unwrap();
/// assert_eq!(score.score, 50.0);
/// assert_eq!(score.label, CredibilityLabel::NeedsReview);
/// ```
pub fn compute_credibility(
    supporting: &[WeightedEvidence],
    contradicting: &[WeightedEvidence],
    neutral: &[WeightedEvidence],
    thresholds: &ScoreThresholds,
) -> Result<CredibilityScore, CredibilityError> {
    for item in supporting.iter().chain(contradicting).chain(neutral) {
        validate_unit("confidence", item.confidence)?;
        validate_unit("source_trust", item.source_trust)?;
    }

    let breakdown = EvidenceBreakdown {
        supporting: supporting.len(),
        contradicting: contradicting.len(),
        neutral: neutral.len(),
    };

    if breakdown.total() == 0 {
        return Ok(CredibilityScore {
            score: NO_EVIDENCE_SCORE,
            label: CredibilityLabel::NeedsReview,
            explanation: "No evidence found to verify claim".to_string(),
            breakdown,
        });
    }

    let raw_score: f64 = supporting.iter().map(contribution).sum::<f64>()
        - contradicting.iter().map(contribution).sum::<f64>();

    let normalized = raw_score / (breakdown.total() as f64).sqrt();
    let score = round_one_decimal(sigmoid(normalized) * 100.0);
    let label = thresholds.label_for(score);

    Ok(CredibilityScore {
        score,
        label,
        explanation: explain(score, label, &breakdown),
        breakdown,
    })
}

/// Unsigned contribution of one item
fn contribution(item: &WeightedEvidence) -> f64 {
    item.confidence * (BASE_WEIGHT + TRUST_WEIGHT * item.source_trust)
}

fn validate_unit(field: &'static str, value: f64) -> Result<(), CredibilityError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CredibilityError::InvalidEvidence { field, value })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn explain(score: f64, label: CredibilityLabel, b: &EvidenceBreakdown) -> String {
    let total = b.total();
    match label {
        CredibilityLabel::Verified => format!(
            "This claim is VERIFIED with {:.0}% confidence. \
             Found {} supporting evidence from {} sources analyzed. \
             The claim is backed by credible sources with high agreement.",
            score, b.supporting, total
        ),
        CredibilityLabel::Fake => format!(
            "This claim is likely FALSE with {:.0}% confidence. \
             Found {} contradicting evidence from {} sources analyzed. \
             Multiple credible sources dispute this claim.",
            100.0 - score,
            b.contradicting,
            total
        ),
        CredibilityLabel::NeedsReview => format!(
            "This claim NEEDS REVIEW (confidence: {:.0}%). \
             Evidence is mixed: {} supporting, {} contradicting from {} sources. \
             Further verification recommended.",
            score, b.supporting, b.contradicting, total
        ),
    }
}
