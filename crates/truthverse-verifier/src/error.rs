//! Error types for the verifier

use thiserror::Error;
use truthverse_domain::CredibilityError;
use truthverse_extractor::ExtractorError;

/// Errors raised while building a verifier or processing one claim
///
/// The public verification entry points never return these: a failed claim
/// is logged and dropped from the report.
#[derive(Error, Debug)]
pub enum VerifierError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Claim extraction failed
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractorError),

    /// The aggregator rejected the collected evidence
    #[error("Scoring failed: {0}")]
    Scoring(#[from] CredibilityError),

    /// A spawned classification task did not complete
    #[error("Task failed: {0}")]
    Task(String),
}
