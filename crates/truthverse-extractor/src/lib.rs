//! TruthVerse Claim Extractor
//!
//! Turns raw text into a bounded, ordered set of canonical candidate claims,
//! each carrying a stable dedup hash.
//!
//! # Overview
//!
//! Extraction is rule-based: the text is split into sentence-like units and a
//! sentence becomes a claim when it carries a factual signal (a percentage, a
//! large number with a unit, an assertion or causal verb, an attribution
//! phrase, or a high-salience entity such as `WHO` or `FDA`).
//!
//! ```text
//! Text → sentences → claim patterns → canonicalize → hash → Claims
//! ```
//!
//! # Canonical hash
//!
//! [`canonical_hash`] replaces every digit run with a placeholder and strips
//! punctuation before hashing with SHA-256. "X increased by 10%" and
//! "X increased by 99%" therefore share a hash. This is intended for
//! deduplication and conflates claims that differ only numerically.
//!
//! # Example Usage
//!
//! ```
//! use truthverse_extractor::{ClaimExtractor, ExtractorConfig};
//!
//! let extractor = ClaimExtractor::new(ExtractorConfig::default()).unwrap();
//! let claims = extractor
//!     .extract("Study shows that 95% of patients improved. Hello there friend.", 10)
//!     .unwrap();
//!
//! assert_eq!(claims.len(), 1);
//! assert_eq!(claims[0].canonical_text, "study shows that 95% of patients improved");
//! ```

#![warn(missing_docs)]

mod canonical;
mod config;
mod error;
mod extractor;
mod patterns;
mod sentences;

#[cfg(test)]
mod tests;

pub use canonical::{canonical_hash, canonicalize, DIGIT_PLACEHOLDER};
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::ClaimExtractor;
pub use patterns::ClaimPatterns;
pub use sentences::split_sentences;
