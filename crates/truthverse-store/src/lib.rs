//! TruthVerse Storage Layer
//!
//! The local evidence corpus behind the retrieval and URL-fetch capabilities.
//!
//! # Architecture
//!
//! - SQLite for sources, documents, and sentence snippets
//! - FTS5 with BM25 ranking for the lexical search path
//! - HNSW over hashed bag-of-words embeddings for the dense search path
//!
//! Joined rows are projected into [`EvidenceSnippet`](truthverse_domain::EvidenceSnippet)
//! at this boundary; nothing downstream sees SQL rows.
//!
//! # Examples
//!
//! ```
//! use truthverse_store::{DocumentRecord, SqliteCorpus};
//!
//! let corpus = SqliteCorpus::in_memory().unwrap();
//! corpus.ingest_document(&DocumentRecord {
//!     source: "Health Desk".to_string(),
//!     domain: Some("health.example".to_string()),
//!     trust: Some(0.9),
//!     url: Some("https://health.example/coffee".to_string()),
//!     title: "Coffee and memory".to_string(),
//!     body: "A trial found coffee improves short term memory in adults.".to_string(),
//!     published_at: None,
//! }).unwrap();
//!
//! let hits = corpus.search_snippets("coffee memory", 5).unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].source_trust, 0.9);
//! ```

#![warn(missing_docs)]

mod corpus;
pub mod embedding;
mod error;
pub mod vector_index;

pub use corpus::{DocumentRecord, IngestSummary, SqliteCorpus};
pub use error::StoreError;
pub use vector_index::{SnippetVectorIndex, VectorIndexError};
