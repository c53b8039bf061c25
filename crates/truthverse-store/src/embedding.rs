//! Embedding model for snippet vectorization
//!
//! Dense retrieval needs text-to-vector conversion that works offline and is
//! stable across runs and toolchains. [`HashedBagOfWords`] feature-hashes lowercase word
//! tokens into a fixed number of signed buckets, so texts that share words
//! land close together under cosine distance. It is not a semantic model; a
//! learned encoder can be plugged in through [`EmbeddingModel`].
//!
//! # Examples
//!
//! ```rust
//! use truthverse_store::embedding::{EmbeddingModel, HashedBagOfWords};
//!
//! let model = HashedBagOfWords::new(256);
//! let embedding = model.embed("Vaccines reduce hospital admissions").unwrap();
//! assert_eq!(embedding.len(), 256);
//!
//! // Same text always produces same embedding
//! assert_eq!(embedding, model.embed("Vaccines reduce hospital admissions").unwrap());
//! ```

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Default embedding dimension
pub const DEFAULT_DIMENSION: usize = 256;

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model inference error
    #[error("Model inference failed: {0}")]
    InferenceFailed(String),
}

/// Trait for embedding models
pub trait EmbeddingModel: Send + Sync {
    /// Generate an embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Get the dimension of embeddings produced by this model
    fn dimension(&self) -> usize;
}

/// Feature-hashed bag-of-words embedding
///
/// Each lowercase alphanumeric token adds ±1 to one bucket; the sign comes
/// from a second hash bit so collisions tend to cancel. The result has unit
/// length.
#[derive(Debug, Clone)]
pub struct HashedBagOfWords {
    dimension: usize,
}

impl HashedBagOfWords {
    /// Create a model producing vectors of `dimension` components
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    /// First eight bytes of the token's SHA-256, big-endian
    fn token_hash(token: &str) -> u64 {
        let digest = Sha256::digest(token.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(prefix)
    }
}

impl Default for HashedBagOfWords {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl EmbeddingModel for HashedBagOfWords {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut embedding = vec![0.0f32; self.dimension];
        let mut tokens = 0usize;

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = Self::token_hash(&token.to_lowercase());
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
            tokens += 1;
        }

        if tokens == 0 {
            return Err(EmbeddingError::InvalidInput(
                "Text contains no word tokens".to_string(),
            ));
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude == 0.0 {
            // every token cancelled out against another
            return Err(EmbeddingError::InferenceFailed(
                "Embedding collapsed to the zero vector".to_string(),
            ));
        }
        for value in &mut embedding {
            *value /= magnitude;
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_embedding_deterministic() {
        let model = HashedBagOfWords::new(128);
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(model.embed(text).unwrap(), model.embed(text).unwrap());
    }

    #[test]
    fn test_token_hash_is_fixed() {
        assert_eq!(HashedBagOfWords::token_hash("vaccines"), 15358581305957646827);
    }

    #[test]
    fn test_embedding_dimension_and_norm() {
        let model = HashedBagOfWords::new(64);
        let embedding = model.embed("test text here").unwrap();
        assert_eq!(embedding.len(), 64);
        assert_eq!(model.dimension(), 64);

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let model = HashedBagOfWords::default();
        assert_eq!(
            model.embed("Masks reduce transmission.").unwrap(),
            model.embed("masks REDUCE transmission").unwrap()
        );
    }

    #[test]
    fn test_shared_words_are_closer() {
        let model = HashedBagOfWords::new(512);
        let query = model.embed("coffee improves memory").unwrap();
        let related = model.embed("studies say coffee improves long term memory").unwrap();
        let unrelated = model.embed("the bridge opened to traffic on sunday").unwrap();
        assert!(cosine(&query, &related) > cosine(&query, &unrelated));
    }

    #[test]
    fn test_empty_text_rejected() {
        let model = HashedBagOfWords::default();
        assert!(matches!(model.embed(""), Err(EmbeddingError::InvalidInput(_))));
        assert!(matches!(model.embed("?!. ,"), Err(EmbeddingError::InvalidInput(_))));
    }
}
