//! HNSW vector index for dense snippet search
//!
//! The dense path of hybrid retrieval. Snippets are embedded with an
//! [`EmbeddingModel`] and inserted into an in-memory HNSW graph; queries are
//! embedded the same way and answered with the nearest snippets by cosine
//! distance. The index is rebuilt from the SQLite corpus at startup.
//!
//! # HNSW Parameters
//!
//! - **M**: Number of bi-directional links per node (16)
//! - **efConstruction**: Candidate list size while building (200)
//! - **efSearch**: Candidate list size while querying (default 64, raised to
//!   `top_k` when smaller)

use crate::corpus::SqliteCorpus;
use crate::embedding::EmbeddingModel;
use crate::error::StoreError;
use hnsw_rs::prelude::*;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};
use truthverse_domain::{CapabilityError, EvidenceSearch, EvidenceSnippet};

const DEFAULT_M: usize = 16;
const DEFAULT_EF_CONSTRUCTION: usize = 200;
const DEFAULT_MAX_ELEMENTS: usize = 100_000;

/// Default search-time candidate list size
pub const DEFAULT_EF_SEARCH: usize = 64;

/// Errors that can occur during vector index operations
#[derive(Error, Debug)]
pub enum VectorIndexError {
    /// Invalid embedding dimension
    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        actual: usize,
    },

    /// A previous panic poisoned an index lock
    #[error("Vector index lock poisoned")]
    LockPoisoned,
}

struct IndexState {
    hnsw: Hnsw<'static, f32, DistCosine>,
    snippets: HashMap<usize, EvidenceSnippet>,
}

/// Dense search capability over corpus snippets
///
/// # Examples
///
/// ```no_run
/// use truthverse_store::embedding::HashedBagOfWords;
/// use truthverse_store::{SnippetVectorIndex, SqliteCorpus};
///
/// let corpus = SqliteCorpus::new("truthverse.db").unwrap();
/// let index = SnippetVectorIndex::from_corpus(&corpus, Box::new(HashedBagOfWords::default())).unwrap();
/// println!("{} snippets indexed", index.len());
/// ```
pub struct SnippetVectorIndex {
    model: Box<dyn EmbeddingModel>,
    ef_search: usize,
    state: Mutex<IndexState>,
}

impl SnippetVectorIndex {
    /// Create an empty index using `model` for embeddings
    pub fn new(model: Box<dyn EmbeddingModel>) -> Self {
        let nb_layer = 16.min((DEFAULT_MAX_ELEMENTS as f32).ln().trunc() as usize);
        let hnsw = Hnsw::<'static, f32, DistCosine>::new(
            DEFAULT_M,
            DEFAULT_MAX_ELEMENTS,
            nb_layer,
            DEFAULT_EF_CONSTRUCTION,
            DistCosine {},
        );

        Self {
            model,
            ef_search: DEFAULT_EF_SEARCH,
            state: Mutex::new(IndexState {
                hnsw,
                snippets: HashMap::new(),
            }),
        }
    }

    /// Set the search-time candidate list size
    pub fn with_ef_search(mut self, ef_search: usize) -> Self {
        self.ef_search = ef_search.max(1);
        self
    }

    /// Build an index holding every snippet currently in `corpus`
    pub fn from_corpus(
        corpus: &SqliteCorpus,
        model: Box<dyn EmbeddingModel>,
    ) -> Result<Self, StoreError> {
        let index = Self::new(model);
        let snippets = corpus.all_snippets()?;
        let total = snippets.len();

        let mut indexed = 0;
        for snippet in snippets {
            if index.add(snippet)? {
                indexed += 1;
            }
        }

        info!("Built vector index with {} of {} snippets", indexed, total);
        Ok(index)
    }

    fn state(&self) -> Result<MutexGuard<'_, IndexState>, VectorIndexError> {
        self.state.lock().map_err(|_| VectorIndexError::LockPoisoned)
    }

    /// Embed and insert a snippet
    ///
    /// Returns `false` when the snippet has no embeddable words and was
    /// skipped.
    pub fn add(&self, snippet: EvidenceSnippet) -> Result<bool, StoreError> {
        let embedding = match self.model.embed(&snippet.text) {
            Ok(embedding) => embedding,
            Err(e) => {
                debug!("Skipping snippet {}: {}", snippet.snippet_id, e);
                return Ok(false);
            }
        };
        if embedding.len() != self.model.dimension() {
            return Err(VectorIndexError::DimensionMismatch {
                expected: self.model.dimension(),
                actual: embedding.len(),
            }
            .into());
        }

        let mut state = self.state()?;
        let internal_id = state.snippets.len();
        state.hnsw.insert((embedding.as_slice(), internal_id));
        state.snippets.insert(internal_id, snippet);
        Ok(true)
    }

    /// Nearest snippets to `query`, relevance = cosine similarity
    pub fn search_similar(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<EvidenceSnippet>, StoreError> {
        if top_k == 0 {
            return Ok(Vec::new());
        }
        let embedding = match self.model.embed(query) {
            Ok(embedding) => embedding,
            Err(e) => {
                debug!("Query not embeddable: {}", e);
                return Ok(Vec::new());
            }
        };

        let state = self.state()?;
        if state.snippets.is_empty() {
            return Ok(Vec::new());
        }

        let ef = self.ef_search.max(top_k);
        let neighbours = state.hnsw.search(&embedding, top_k, ef);

        let mut results: Vec<EvidenceSnippet> = neighbours
            .into_iter()
            .filter_map(|neighbour| {
                state.snippets.get(&neighbour.d_id).map(|snippet| {
                    let mut snippet = snippet.clone();
                    // HNSW returns cosine distance; similarity is 1 - distance
                    snippet.relevance = f64::from(1.0 - neighbour.distance);
                    snippet
                })
            })
            .collect();

        results.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        results.truncate(top_k);
        Ok(results)
    }

    /// Number of indexed snippets
    pub fn len(&self) -> usize {
        self.state().map(|s| s.snippets.len()).unwrap_or(0)
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EvidenceSearch for SnippetVectorIndex {
    fn name(&self) -> &str {
        "hnsw"
    }

    fn search(&self, query: &str, top_k: usize) -> Result<Vec<EvidenceSnippet>, CapabilityError> {
        Ok(self.search_similar(query, top_k)?)
    }
}
