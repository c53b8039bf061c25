//! Integration tests for truthverse-store
//!
//! These tests exercise ingest, lexical search, URL lookup, and the dense
//! index built from the corpus.

use truthverse_domain::{DocumentFetcher, EvidenceSearch, DEFAULT_SOURCE_TRUST};
use truthverse_store::embedding::HashedBagOfWords;
use truthverse_store::{DocumentRecord, SnippetVectorIndex, SqliteCorpus, StoreError};

fn record(source: &str, url: &str, body: &str) -> DocumentRecord {
    DocumentRecord {
        source: source.to_string(),
        domain: Some(format!("{}.example", source.to_lowercase())),
        trust: Some(0.8),
        url: Some(url.to_string()),
        title: "Headline".to_string(),
        body: body.to_string(),
        published_at: None,
    }
}

fn seeded_corpus() -> SqliteCorpus {
    let corpus = SqliteCorpus::in_memory().unwrap();
    corpus
        .ingest_document(&record(
            "Wire",
            "https://wire.example/coffee",
            "Researchers found that coffee improves short term memory. \
             The effect faded after two weeks of daily use.",
        ))
        .unwrap();
    corpus
        .ingest_document(&record(
            "Ledger",
            "https://ledger.example/bridge",
            "The city bridge reopened to traffic on Sunday morning. Tolls remain unchanged for now.",
        ))
        .unwrap();
    corpus
}

#[test]
fn test_corpus_initialization() {
    let corpus = SqliteCorpus::in_memory();
    assert!(corpus.is_ok(), "Corpus should initialize successfully");
    assert_eq!(corpus.unwrap().snippet_count().unwrap(), 0);
}

#[test]
fn test_ingest_splits_sentences() {
    let corpus = SqliteCorpus::in_memory().unwrap();
    let summary = corpus
        .ingest_document(&record(
            "Wire",
            "https://wire.example/a",
            "Short one. This sentence is long enough to index! And this one is as well?",
        ))
        .unwrap();

    assert_eq!(summary.snippet_count, 2);
    assert_eq!(corpus.snippet_count().unwrap(), 2);
}

#[test]
fn test_lexical_search_ranks_matching_snippet() {
    let corpus = seeded_corpus();
    let results = corpus.search("Does coffee improve memory?", 10).unwrap();

    assert!(!results.is_empty());
    assert!(results[0].text.contains("coffee improves short term memory"));
    assert_eq!(results[0].source_name, "Wire");
    assert_eq!(results[0].source_domain.as_deref(), Some("wire.example"));
    assert_eq!(results[0].url.as_deref(), Some("https://wire.example/coffee"));
    assert_eq!(results[0].source_trust, 0.8);
    assert!(results.windows(2).all(|w| w[0].relevance >= w[1].relevance));
}

#[test]
fn test_search_respects_top_k_and_empty_queries() {
    let corpus = seeded_corpus();
    assert!(corpus.search("the", 1).unwrap().len() <= 1);
    assert!(corpus.search("?!", 10).unwrap().is_empty());
    assert!(corpus.search("zeppelin", 10).unwrap().is_empty());
}

#[test]
fn test_unknown_trust_defaults() {
    let corpus = SqliteCorpus::in_memory().unwrap();
    let mut doc = record("Blog", "https://blog.example/x", "Someone claimed the moon is made of cheese.");
    doc.trust = None;
    corpus.ingest_document(&doc).unwrap();

    let results = corpus.search("moon cheese", 5).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source_trust, DEFAULT_SOURCE_TRUST);
}

#[test]
fn test_source_reused_by_name() {
    let corpus = seeded_corpus();
    corpus
        .ingest_document(&record(
            "Wire",
            "https://wire.example/second",
            "A second report on coffee consumption was published today.",
        ))
        .unwrap();

    let results = corpus.search("coffee", 10).unwrap();
    let wire_ids: Vec<_> = results
        .iter()
        .filter(|s| s.source_name == "Wire")
        .map(|s| s.source_id.clone())
        .collect();
    assert!(wire_ids.len() >= 2);
    assert!(wire_ids.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_invalid_records_rejected() {
    let corpus = SqliteCorpus::in_memory().unwrap();

    let mut bad_trust = record("Wire", "https://wire.example/t", "Body text that is long enough.");
    bad_trust.trust = Some(1.5);
    assert!(matches!(
        corpus.ingest_document(&bad_trust),
        Err(StoreError::InvalidData(_))
    ));

    let doc = record("Wire", "https://wire.example/d", "Body text that is long enough.");
    corpus.ingest_document(&doc).unwrap();
    assert!(matches!(
        corpus.ingest_document(&doc),
        Err(StoreError::Duplicate(_))
    ));
}

#[test]
fn test_fetch_by_exact_and_normalised_url() {
    let corpus = seeded_corpus();

    let exact = corpus.fetch_or_search("https://wire.example/coffee").unwrap();
    assert_eq!(exact.unwrap().title, "Headline");

    let loose = corpus.fetch_or_search("http://wire.example/coffee/").unwrap();
    assert!(loose.is_some());
    assert!(loose.unwrap().body_text.contains("coffee"));

    assert!(corpus
        .fetch_or_search("https://elsewhere.example/coffee")
        .unwrap()
        .is_none());
}

#[test]
fn test_persistent_corpus_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.db");

    {
        let corpus = SqliteCorpus::new(&path).unwrap();
        corpus
            .ingest_document(&record(
                "Wire",
                "https://wire.example/p",
                "Vaccination rates increased across the region this year.",
            ))
            .unwrap();
    }

    let reopened = SqliteCorpus::new(&path).unwrap();
    assert_eq!(reopened.snippet_count().unwrap(), 1);
    assert_eq!(reopened.search("vaccination", 5).unwrap().len(), 1);
}

#[test]
fn test_dense_index_from_corpus() {
    let corpus = seeded_corpus();
    let index =
        SnippetVectorIndex::from_corpus(&corpus, Box::new(HashedBagOfWords::new(256))).unwrap();
    assert_eq!(index.len(), corpus.snippet_count().unwrap());

    let results = EvidenceSearch::search(&index, "bridge reopened to traffic", 2).unwrap();
    assert!(!results.is_empty());
    assert!(results[0].text.contains("bridge reopened"));

    // dense and lexical paths share snippet ids
    let lexical = corpus.search("bridge reopened to traffic", 1).unwrap();
    assert_eq!(lexical[0].snippet_id, results[0].snippet_id);
}

#[test]
fn test_ingest_records_parse_from_json() {
    let json = r#"[
        {"source": "Wire", "domain": "wire.example", "trust": 0.7,
         "url": "https://wire.example/j", "title": "T",
         "body": "Unemployment fell to a record low in March."},
        {"source": "Blog", "title": "U", "body": "No url or trust is given for this one."}
    ]"#;
    let records: Vec<DocumentRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].url, None);

    let corpus = SqliteCorpus::in_memory().unwrap();
    for r in &records {
        corpus.ingest_document(r).unwrap();
    }
    assert_eq!(corpus.snippet_count().unwrap(), 2);
}
