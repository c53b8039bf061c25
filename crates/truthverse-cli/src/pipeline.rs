//! Wiring of the verification pipeline from configuration and API keys.

use crate::config::Config;
use crate::error::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use truthverse_connectors::{FactCheckConnector, NewsApiConnector};
use truthverse_domain::{DocumentFetcher, EvidenceSearch, StanceModel};
use truthverse_extractor::ClaimExtractor;
use truthverse_nli::{HfInferenceModel, StanceClassifier};
use truthverse_retriever::{HybridRetriever, InterleavedSearch};
use truthverse_store::embedding::HashedBagOfWords;
use truthverse_store::{SnippetVectorIndex, SqliteCorpus};
use truthverse_verifier::Verifier;

/// API keys supplied through flags or the environment.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// Hosted stance inference
    pub hf: Option<String>,
    /// NewsAPI
    pub newsapi: Option<String>,
    /// Google Fact Check Tools
    pub factcheck: Option<String>,
}

/// Open the corpus and assemble a verifier around it.
///
/// - lexical path: the corpus, interleaved with fact-check reviews when a key
///   is present
/// - dense path: an in-memory vector index over the corpus, when enabled
/// - stance: hosted inference when enabled and keyed, the heuristic otherwise
/// - URL mode: the corpus, then NewsAPI when keyed
pub fn build_verifier(config: &Config, database: &Path, keys: &ApiKeys) -> Result<Verifier> {
    let corpus = Arc::new(SqliteCorpus::new(database)?);
    info!("Opened corpus at {}", database.display());

    let lexical: Arc<dyn EvidenceSearch> = match keys.factcheck.clone() {
        Some(key) => {
            let factcheck = FactCheckConnector::new(&config.connectors, Some(key))?;
            Arc::new(InterleavedSearch::new(vec![
                corpus.clone() as Arc<dyn EvidenceSearch>,
                Arc::new(factcheck),
            ]))
        }
        None => corpus.clone() as Arc<dyn EvidenceSearch>,
    };

    let mut retriever = HybridRetriever::new(lexical, config.retriever.clone())?;
    if config.corpus.dense_index {
        let model = Box::new(HashedBagOfWords::new(config.corpus.embedding_dimension));
        let index = SnippetVectorIndex::from_corpus(&corpus, model)?;
        if index.is_empty() {
            warn!("Corpus has no snippets; dense retrieval disabled");
        } else {
            retriever = retriever.with_dense(Arc::new(index));
        }
    }

    let classifier = build_classifier(config, keys)?;
    info!("Stance classifier: {}", classifier.describe());

    let extractor = ClaimExtractor::new(config.extractor.clone())?;
    let mut verifier = Verifier::new(extractor, retriever, classifier, config.verifier.clone())?
        .with_fetcher(corpus);
    if keys.newsapi.is_some() {
        let news = NewsApiConnector::new(&config.connectors, keys.newsapi.clone())?;
        verifier = verifier.with_fetcher(Arc::new(news) as Arc<dyn DocumentFetcher>);
    }

    Ok(verifier)
}

fn build_classifier(config: &Config, keys: &ApiKeys) -> Result<StanceClassifier> {
    let model: Option<Arc<dyn StanceModel>> = match (&keys.hf, config.stance.use_inference) {
        (Some(key), true) => Some(Arc::new(HfInferenceModel::from_config(
            &config.stance,
            Some(key.clone()),
        )?)),
        (None, true) => {
            warn!("No inference API key configured; using keyword-overlap stance detection");
            None
        }
        (_, false) => None,
    };
    Ok(StanceClassifier::from_optional(model, &config.stance))
}
