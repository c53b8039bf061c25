//! TruthVerse Domain Layer
//!
//! This crate contains the data model of the claim verification pipeline and
//! the capability traits through which the pipeline reaches its external
//! collaborators (search backends, stance inference, document fetch).
//! It performs no I/O; the only dependencies are `serde` for wire types and
//! `thiserror` for error enums.
//!
//! ## Key Concepts
//!
//! - **Claim**: A canonicalized assertion extracted from source text
//! - **Evidence Snippet**: A retrieved text fragment with source trust metadata
//! - **Stance Judgment**: support / contradict / neutral plus a confidence
//! - **Credibility Score**: The aggregate 0-100 verdict for one claim
//!
//! ## Architecture
//!
//! - Pure data types and the deterministic scoring formula live here
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod credibility;
pub mod credibility_computation;
pub mod evidence;
pub mod traits;

// Re-exports for convenience
pub use claim::{Claim, ClaimId};
pub use credibility::{CredibilityLabel, CredibilityScore, EvidenceBreakdown, ScoreThresholds};
pub use credibility_computation::{compute_credibility, CredibilityError};
pub use evidence::{EvidenceSnippet, Stance, StanceJudgment, WeightedEvidence, DEFAULT_SOURCE_TRUST};
pub use traits::{
    CapabilityError, DocumentFetcher, EvidenceSearch, FetchedDocument, RawStance, StanceModel,
};
