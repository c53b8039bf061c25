//! TruthVerse Evidence Retriever
//!
//! Given a claim, returns a ranked list of evidence snippets with source-trust
//! metadata.
//!
//! # Overview
//!
//! Two ranked sources feed the retriever:
//!
//! ```text
//! query ─┬─► lexical search (always present) ──┐
//!        └─► dense search   (optional)       ──┴─► fusion ─► top_k snippets
//! ```
//!
//! Each backend call runs on the blocking pool under a timeout. Failures are
//! logged and degrade the result; [`HybridRetriever::retrieve`] never returns
//! an error, so "no evidence" reaches the scorer as a normal outcome.
//!
//! # Fusion
//!
//! - [`FusionStrategy::Weighted`]: max-normalised relevance, weighted sum
//! - [`FusionStrategy::ReciprocalRank`]: Σ 1/(k + rank)
//!
//! Backends whose scores cannot be compared with each other (the local corpus
//! and a fact-check API, say) can share the lexical path through
//! [`InterleavedSearch`], which merges them by rank.

#![warn(missing_docs)]

mod config;
mod error;
mod fusion;
mod interleave;
mod retriever;

pub use config::{FusionStrategy, RetrieverConfig};
pub use error::RetrieverError;
pub use fusion::fuse;
pub use interleave::InterleavedSearch;
pub use retriever::HybridRetriever;
