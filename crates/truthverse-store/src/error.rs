//! Error types for the storage layer

use crate::embedding::EmbeddingError;
use crate::vector_index::VectorIndexError;
use thiserror::Error;
use truthverse_domain::CapabilityError;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A document with this URL is already stored
    #[error("Duplicate document: {0}")]
    Duplicate(String),

    /// Embedding failure while indexing
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Vector index failure
    #[error("Vector index error: {0}")]
    VectorIndex(#[from] VectorIndexError),

    /// A previous panic poisoned the connection lock
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl From<StoreError> for CapabilityError {
    fn from(err: StoreError) -> Self {
        CapabilityError::Failed(err.to_string())
    }
}
