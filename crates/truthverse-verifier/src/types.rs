//! Result types produced by the verifier

use serde::{Deserialize, Serialize};
use truthverse_domain::{ClaimId, CredibilityLabel, EvidenceBreakdown, Stance};
use uuid::Uuid;

/// One classified evidence item attached to a verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Snippet text
    pub snippet: String,
    /// Source name
    pub source: String,
    /// Stance towards the claim
    pub stance: Stance,
    /// Stance confidence in [0, 1]
    pub confidence: f64,
    /// Source URL, when known
    pub url: Option<String>,
}

/// Verdict for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimVerdict {
    /// Canonical hash of the claim
    pub id: ClaimId,
    /// Canonical claim text
    pub claim_text: String,
    /// Credibility score in [0, 100]
    pub cred_score: f64,
    /// Categorical label
    pub label: CredibilityLabel,
    /// Templated explanation
    pub explanation: String,
    /// Evidence counts that went into the score
    pub breakdown: EvidenceBreakdown,
    /// Supporting and contradicting evidence, best ranked first
    pub evidence: Vec<EvidenceItem>,
}

/// Result of one verification request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Request identifier (UUIDv7)
    pub request_id: Uuid,
    /// Verdicts in extraction order
    pub claims: Vec<ClaimVerdict>,
    /// Wall-clock processing time
    pub processing_time_ms: u64,
    /// Distinct sources among all retrieved snippets
    pub checked_sources: usize,
}

impl VerificationReport {
    /// A report with no claims
    pub fn empty(processing_time_ms: u64) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            claims: Vec::new(),
            processing_time_ms,
            checked_sources: 0,
        }
    }

    /// Whether no claim could be verified
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
