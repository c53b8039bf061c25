//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the verification pipeline and
//! its collaborators. Implementations live in other crates (truthverse-store,
//! truthverse-nli, truthverse-connectors). All traits are synchronous; callers
//! that run inside an async runtime move the call onto the blocking pool and
//! bound it with a timeout.

use crate::evidence::EvidenceSnippet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of an external capability
///
/// The pipeline never surfaces these to its caller; they are logged and turned
/// into "no result" outcomes (empty evidence, fallback stance, empty claim list).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    /// The capability is not configured or has disabled itself
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within its time budget
    #[error("Capability timed out after {0} ms")]
    Timeout(u64),

    /// The backend answered with something we could not interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Any other backend failure (I/O, HTTP, database)
    #[error("Capability failed: {0}")]
    Failed(String),
}

/// A ranked source of evidence snippets
///
/// Implemented by the lexical corpus search, the dense vector index, and
/// third-party connectors. Results must be ordered best-first and carry a
/// relevance score that is comparable within one result list.
pub trait EvidenceSearch: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Return at most `top_k` snippets for `query`
    fn search(&self, query: &str, top_k: usize) -> Result<Vec<EvidenceSnippet>, CapabilityError>;
}

/// Raw output of a text-pair classification model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStance {
    /// Model label, e.g. "ENTAILMENT", "contradiction", "neutral"
    pub label: String,

    /// The model's probability for `label`
    pub confidence: f64,
}

/// Text-pair classification capability (NLI)
///
/// Implemented by the remote inference client and by test mocks.
pub trait StanceModel: Send + Sync {
    /// Model identifier used in logs
    fn model_name(&self) -> &str;

    /// Classify the relationship of `evidence` to `claim`
    fn classify_pair(&self, claim: &str, evidence: &str) -> Result<RawStance, CapabilityError>;
}

/// A document fetched for URL-mode verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedDocument {
    /// Document title
    pub title: String,

    /// Document body text
    pub body_text: String,

    /// Canonical URL of the document, when known
    pub url: Option<String>,
}

impl FetchedDocument {
    /// Text handed to the extractor: title followed by body
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.body_text)
    }
}

/// Fetch-or-search capability used in URL mode
pub trait DocumentFetcher: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Return the document at `url`, or the best match found by searching for it
    fn fetch_or_search(&self, url: &str) -> Result<Option<FetchedDocument>, CapabilityError>;
}
