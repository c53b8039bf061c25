//! TruthVerse Verifier
//!
//! Composes the pipeline stages into per-request claim verification.
//!
//! # Overview
//!
//! ```text
//! text ─► extract ─► (≤5 claims) ─► retrieve (≤20) ─► classify (≤10) ─► score ─► report
//! url  ─► fetcher chain ─► title + body ─┘
//! ```
//!
//! For each claim the top snippets are classified concurrently, partitioned
//! into supporting, contradicting and neutral evidence, and scored by
//! [`truthverse_domain::compute_credibility`]. Neutral evidence counts toward
//! the score's normalisation but is not attached to the verdict.
//!
//! # Failure handling
//!
//! [`Verifier::verify_text`] and [`Verifier::verify_url`] never fail. The
//! worst outcome is an empty or partial [`VerificationReport`]:
//!
//! - extraction fails: no claims
//! - retrieval fails: the claim is scored without evidence (`needs_review`)
//! - inference fails: the stance heuristic is used
//! - scoring or classification of one claim fails: that claim is dropped

#![warn(missing_docs)]

mod config;
mod error;
mod types;
mod verifier;


pub use config::VerifierConfig;
pub use error::VerifierError;
pub use types::{ClaimVerdict, EvidenceItem, VerificationReport};
pub use verifier::Verifier;
