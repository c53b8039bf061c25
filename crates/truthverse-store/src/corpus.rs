//! SQLite-backed evidence corpus

use crate::error::StoreError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use truthverse_domain::{
    CapabilityError, DocumentFetcher, EvidenceSearch, EvidenceSnippet, FetchedDocument,
    DEFAULT_SOURCE_TRUST,
};
use truthverse_extractor::split_sentences;
use url::Url;

/// Sentences at or below this many characters are not indexed
const MIN_SNIPPET_CHARS: usize = 20;

const SNIPPET_SELECT: &str = "
    SELECT s.id, s.sentence_text, d.id, d.url, src.id, src.name, src.domain, src.trust_score";

/// A document to add to the corpus
///
/// This is also the record format read by `truthverse ingest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Source (publisher) name; sources are matched by name
    pub source: String,

    /// Source domain
    #[serde(default)]
    pub domain: Option<String>,

    /// Source trust in [0.0, 1.0]
    #[serde(default)]
    pub trust: Option<f64>,

    /// Document URL
    #[serde(default)]
    pub url: Option<String>,

    /// Document title
    pub title: String,

    /// Document body text
    pub body: String,

    /// Publication timestamp, free-form
    #[serde(default)]
    pub published_at: Option<String>,
}

/// Result of ingesting one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Row id of the new document
    pub document_id: i64,
    /// Number of sentence snippets indexed
    pub snippet_count: usize,
}

/// SQLite implementation of the lexical search and document fetch capabilities
///
/// The connection sits behind a mutex so one corpus can be shared by the
/// retriever and the URL-mode fetcher across blocking-pool threads.
pub struct SqliteCorpus {
    conn: Mutex<Connection>,
}

impl SqliteCorpus {
    /// Open (or create) a corpus at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use truthverse_store::SqliteCorpus;
    ///
    /// let corpus = SqliteCorpus::new("truthverse.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an empty in-memory corpus
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Store a document and index its sentences
    ///
    /// The source is created on first use and its domain/trust updated when
    /// the record supplies them.
    pub fn ingest_document(&self, record: &DocumentRecord) -> Result<IngestSummary, StoreError> {
        if record.source.trim().is_empty() {
            return Err(StoreError::InvalidData("source name is empty".to_string()));
        }
        if let Some(trust) = record.trust {
            if !(0.0..=1.0).contains(&trust) {
                return Err(StoreError::InvalidData(format!(
                    "trust must be in [0, 1], got {}",
                    trust
                )));
            }
        }

        let mut conn = self.conn()?;

        if let Some(url) = &record.url {
            let exists: bool = conn
                .query_row("SELECT 1 FROM documents WHERE url = ?1", params![url], |_| {
                    Ok(true)
                })
                .optional()?
                .unwrap_or(false);
            if exists {
                return Err(StoreError::Duplicate(url.clone()));
            }
        }

        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO sources (name, domain, trust_score) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET
             domain = COALESCE(excluded.domain, sources.domain),
             trust_score = COALESCE(excluded.trust_score, sources.trust_score)",
            params![record.source.trim(), record.domain, record.trust],
        )?;
        let source_id: i64 = tx.query_row(
            "SELECT id FROM sources WHERE name = ?1",
            params![record.source.trim()],
            |row| row.get(0),
        )?;

        tx.execute(
            "INSERT INTO documents (source_id, url, url_key, title, body_text, published_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                source_id,
                record.url,
                record.url.as_deref().map(url_key),
                record.title,
                record.body,
                record.published_at,
            ],
        )?;
        let document_id = tx.last_insert_rowid();

        let sentences = split_sentences(&record.body, MIN_SNIPPET_CHARS);
        for sentence in &sentences {
            tx.execute(
                "INSERT INTO snippets (document_id, sentence_text) VALUES (?1, ?2)",
                params![document_id, sentence],
            )?;
            let snippet_id = tx.last_insert_rowid();
            tx.execute(
                "INSERT INTO snippets_fts (rowid, sentence_text) VALUES (?1, ?2)",
                params![snippet_id, sentence],
            )?;
        }

        tx.commit()?;

        info!(
            "Ingested document {} from '{}' with {} snippets",
            document_id,
            record.source,
            sentences.len()
        );

        Ok(IngestSummary {
            document_id,
            snippet_count: sentences.len(),
        })
    }

    /// Number of indexed snippets
    pub fn snippet_count(&self) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM snippets", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Every snippet in the corpus, in insertion order, with relevance 0
    ///
    /// Used to (re)build the dense index.
    pub fn all_snippets(&self) -> Result<Vec<EvidenceSnippet>, StoreError> {
        let conn = self.conn()?;
        let sql = format!(
            "{}, 0.0
             FROM snippets s
             JOIN documents d ON d.id = s.document_id
             JOIN sources src ON src.id = d.source_id
             ORDER BY s.id",
            SNIPPET_SELECT
        );
        let mut stmt = conn.prepare(&sql)?;
        let snippets = stmt
            .query_map([], project_snippet)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(snippets)
    }

    /// Full-text search ranked by BM25, best first
    ///
    /// Query words are OR-ed, so a snippet matching any word is a candidate.
    /// A query without word characters returns nothing.
    pub fn search_snippets(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<EvidenceSnippet>, StoreError> {
        let Some(match_expr) = fts_match_expression(query) else {
            return Ok(Vec::new());
        };
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let conn = self.conn()?;
        let sql = format!(
            "{}, -bm25(snippets_fts) AS relevance
             FROM snippets_fts
             JOIN snippets s ON s.id = snippets_fts.rowid
             JOIN documents d ON d.id = s.document_id
             JOIN sources src ON src.id = d.source_id
             WHERE snippets_fts MATCH ?1
             ORDER BY relevance DESC, s.id ASC
             LIMIT ?2",
            SNIPPET_SELECT
        );
        let mut stmt = conn.prepare(&sql)?;
        let snippets = stmt
            .query_map(params![match_expr, top_k as i64], project_snippet)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("FTS query '{}' matched {} snippets", match_expr, snippets.len());
        Ok(snippets)
    }

    /// Find a stored document by URL
    ///
    /// Tries an exact match first, then a match that ignores the scheme,
    /// letter case of the host, and a trailing slash.
    pub fn find_document(&self, url: &str) -> Result<Option<FetchedDocument>, StoreError> {
        let conn = self.conn()?;

        let to_document = |row: &Row<'_>| -> rusqlite::Result<FetchedDocument> {
            Ok(FetchedDocument {
                title: row.get(0)?,
                body_text: row.get(1)?,
                url: row.get(2)?,
            })
        };

        let exact = conn
            .query_row(
                "SELECT title, body_text, url FROM documents WHERE url = ?1",
                params![url],
                to_document,
            )
            .optional()?;
        if exact.is_some() {
            return Ok(exact);
        }

        let document = conn
            .query_row(
                "SELECT title, body_text, url FROM documents WHERE url_key = ?1
                 ORDER BY id LIMIT 1",
                params![url_key(url)],
                to_document,
            )
            .optional()?;
        Ok(document)
    }
}

impl EvidenceSearch for SqliteCorpus {
    fn name(&self) -> &str {
        "sqlite-fts"
    }

    fn search(&self, query: &str, top_k: usize) -> Result<Vec<EvidenceSnippet>, CapabilityError> {
        Ok(self.search_snippets(query, top_k)?)
    }
}

impl DocumentFetcher for SqliteCorpus {
    fn name(&self) -> &str {
        "sqlite-corpus"
    }

    fn fetch_or_search(&self, url: &str) -> Result<Option<FetchedDocument>, CapabilityError> {
        Ok(self.find_document(url)?)
    }
}

/// Typed projection of a joined snippet row
///
/// Column order follows `SNIPPET_SELECT` plus a trailing relevance column.
fn project_snippet(row: &Row<'_>) -> rusqlite::Result<EvidenceSnippet> {
    let snippet_id: i64 = row.get(0)?;
    let document_id: i64 = row.get(2)?;
    let source_id: i64 = row.get(4)?;
    let trust: Option<f64> = row.get(7)?;

    Ok(EvidenceSnippet {
        snippet_id: snippet_id.to_string(),
        text: row.get(1)?,
        document_id: Some(document_id.to_string()),
        source_id: Some(source_id.to_string()),
        source_name: row.get(5)?,
        source_domain: row.get(6)?,
        url: row.get(3)?,
        source_trust: trust.unwrap_or(DEFAULT_SOURCE_TRUST),
        relevance: row.get(8)?,
    })
}

/// Build an FTS5 MATCH expression of quoted, OR-ed, de-duplicated words
fn fts_match_expression(query: &str) -> Option<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let term = format!("\"{}\"", word.to_lowercase());
        if !terms.contains(&term) {
            terms.push(term);
        }
    }

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

/// Scheme- and trailing-slash-insensitive lookup key for a URL
fn url_key(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(parsed) if parsed.host_str().is_some() => {
            let mut key = parsed.host_str().unwrap_or_default().to_lowercase();
            if let Some(port) = parsed.port() {
                key.push_str(&format!(":{}", port));
            }
            key.push_str(parsed.path().trim_end_matches('/'));
            if let Some(query) = parsed.query() {
                key.push('?');
                key.push_str(query);
            }
            key
        }
        _ => raw.trim().trim_end_matches('/').to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fts_match_expression() {
        assert_eq!(
            fts_match_expression("Coffee improves memory, coffee!").as_deref(),
            Some("\"coffee\" OR \"improves\" OR \"memory\"")
        );
        assert_eq!(fts_match_expression("  ?! "), None);
    }

    #[test]
    fn test_fts_expression_neutralises_operators() {
        // FTS5 keywords and syntax characters arrive quoted
        let expr = fts_match_expression("NOT \"x\" AND y*").unwrap();
        assert_eq!(expr, "\"not\" OR \"x\" OR \"and\" OR \"y\"");
    }

    #[test]
    fn test_url_key_ignores_scheme_and_trailing_slash() {
        assert_eq!(
            url_key("https://Example.com/news/story/"),
            url_key("http://example.com/news/story")
        );
        assert_ne!(
            url_key("https://example.com/news/a"),
            url_key("https://example.com/news/b")
        );
        assert_eq!(url_key("not a url/"), "not a url");
    }
}
