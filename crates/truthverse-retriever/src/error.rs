//! Error types for the retriever

use thiserror::Error;

/// Errors raised while building a retriever
///
/// Retrieval itself never fails; see [`crate::HybridRetriever::retrieve`].
#[derive(Error, Debug)]
pub enum RetrieverError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
