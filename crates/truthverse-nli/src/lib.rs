//! TruthVerse Stance Classifier
//!
//! Decides whether an evidence snippet supports, contradicts, or is neutral
//! to a claim.
//!
//! # Architecture
//!
//! [`StanceClassifier`] is a strategy chosen at construction:
//!
//! - `Inference`: calls a [`StanceModel`](truthverse_domain::StanceModel) on
//!   the blocking pool under a timeout, maps its label by substring
//!   (entailment/support → support, contradiction → contradict, else neutral)
//! - `Heuristic`: keyword overlap, never reports contradiction
//!
//! Any model failure, timeout, or malformed output falls back to the
//! heuristic, so classification never fails.
//!
//! # Models
//!
//! - [`MockStanceModel`]: Deterministic mock for testing
//! - [`HfInferenceModel`]: Hosted inference endpoint client
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use truthverse_domain::Stance;
//! use truthverse_nli::{MockStanceModel, StanceClassifier, StanceConfig};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let model = Arc::new(MockStanceModel::new("ENTAILMENT", 0.9));
//! let classifier = StanceClassifier::inference(model, &StanceConfig::default());
//!
//! let judgment = classifier.classify("the sky is blue", "the sky appears blue").await;
//! assert_eq!(judgment.stance, Stance::Support);
//! assert_eq!(judgment.explanation, "Evidence supports the claim with 90.0% confidence");
//! # });
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod heuristic;
pub mod hf;
mod mock;

pub use classifier::StanceClassifier;
pub use config::{StanceConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use error::NliError;
pub use heuristic::{
    explain, heuristic_stance, FALLBACK_EXPLANATION, FALLBACK_NEUTRAL_CONFIDENCE,
    FALLBACK_SUPPORT_CONFIDENCE,
};
pub use hf::HfInferenceModel;
pub use mock::MockStanceModel;
