//! Core HybridRetriever implementation

use crate::config::RetrieverConfig;
use crate::error::RetrieverError;
use crate::fusion::fuse;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use truthverse_domain::{CapabilityError, EvidenceSearch, EvidenceSnippet, DEFAULT_SOURCE_TRUST};

/// Evidence retriever over a lexical path and an optional dense path
///
/// Never fails: backend errors and timeouts are logged and treated as "no
/// results" for that path.
pub struct HybridRetriever {
    lexical: Arc<dyn EvidenceSearch>,
    dense: Option<Arc<dyn EvidenceSearch>>,
    config: RetrieverConfig,
}

impl HybridRetriever {
    /// Create a lexical-only retriever, validating the configuration
    pub fn new(
        lexical: Arc<dyn EvidenceSearch>,
        config: RetrieverConfig,
    ) -> Result<Self, RetrieverError> {
        config.validate().map_err(RetrieverError::Config)?;
        Ok(Self {
            lexical,
            dense: None,
            config,
        })
    }

    /// Add a dense path merged with the lexical results
    pub fn with_dense(mut self, dense: Arc<dyn EvidenceSearch>) -> Self {
        self.dense = Some(dense);
        self
    }

    /// Whether a dense path is configured
    pub fn has_dense(&self) -> bool {
        self.dense.is_some()
    }

    /// Get the retriever configuration
    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Retrieve at most `top_k` snippets for `query`, best first
    ///
    /// Degradation: a failed dense path yields lexical-only results, a failed
    /// lexical path yields dense-only results, and both failing yields an
    /// empty list.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Vec<EvidenceSnippet> {
        if top_k == 0 || query.trim().is_empty() {
            return Vec::new();
        }

        let lexical_search = self.run_search(Arc::clone(&self.lexical), query, top_k);
        let dense_search = async {
            match &self.dense {
                Some(dense) => Some(self.run_search(Arc::clone(dense), query, top_k).await),
                None => None,
            }
        };
        let (lexical, dense) = tokio::join!(lexical_search, dense_search);

        let lexical = lexical
            .map_err(|e| warn!("Lexical search '{}' failed: {}", self.lexical.name(), e))
            .ok();
        let dense = dense.and_then(|result| {
            result
                .map_err(|e| warn!("Dense search failed, using lexical only: {}", e))
                .ok()
        });

        let snippets = match (lexical, dense) {
            (Some(lexical), Some(dense)) => fuse(lexical, dense, &self.config.fusion, top_k),
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => Vec::new(),
        };

        let snippets: Vec<EvidenceSnippet> = snippets
            .into_iter()
            .take(top_k)
            .map(sanitize)
            .collect();

        info!("Retrieved {} snippets for query ({} chars)", snippets.len(), query.len());
        snippets
    }

    /// Run one backend search on the blocking pool under the configured timeout
    async fn run_search(
        &self,
        backend: Arc<dyn EvidenceSearch>,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<EvidenceSnippet>, CapabilityError> {
        let name = backend.name().to_string();
        let query = query.to_string();

        let task = tokio::task::spawn_blocking(move || backend.search(&query, top_k));

        let mut results = timeout(self.config.search_timeout(), task)
            .await
            .map_err(|_| CapabilityError::Timeout(self.config.search_timeout_ms))?
            .map_err(|e| CapabilityError::Failed(format!("Task join error: {}", e)))??;

        results.truncate(top_k);
        debug!("Backend '{}' returned {} snippets", name, results.len());
        Ok(results)
    }
}

/// Clamp trust into [0, 1] and replace non-finite numbers
fn sanitize(mut snippet: EvidenceSnippet) -> EvidenceSnippet {
    snippet.source_trust = if snippet.source_trust.is_finite() {
        snippet.source_trust.clamp(0.0, 1.0)
    } else {
        DEFAULT_SOURCE_TRUST
    };
    if !snippet.relevance.is_finite() {
        snippet.relevance = 0.0;
    }
    snippet
}
