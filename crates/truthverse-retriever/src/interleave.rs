//! Round-robin combination of several evidence backends behind one search

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use truthverse_domain::{CapabilityError, EvidenceSearch, EvidenceSnippet};

/// Several [`EvidenceSearch`] backends presented as one ranked list
///
/// Relevance scores from different backends are not comparable, so results
/// are interleaved by rank (first of each member, then second of each, ...)
/// and relevance is reassigned as `1 / (rank + 1)`. A failing member is
/// skipped; the search fails only when every member fails.
pub struct InterleavedSearch {
    name: String,
    members: Vec<Arc<dyn EvidenceSearch>>,
}

impl InterleavedSearch {
    /// Create an interleaving search over `members`, in priority order
    pub fn new(members: Vec<Arc<dyn EvidenceSearch>>) -> Self {
        let name = members
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join("+");
        Self { name, members }
    }

    /// Number of member backends
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if there are no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl EvidenceSearch for InterleavedSearch {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, query: &str, top_k: usize) -> Result<Vec<EvidenceSnippet>, CapabilityError> {
        let mut lists = Vec::with_capacity(self.members.len());
        let mut last_error = None;

        for member in &self.members {
            match member.search(query, top_k) {
                Ok(results) => lists.push(results.into_iter()),
                Err(e) => {
                    warn!("Evidence backend '{}' failed: {}", member.name(), e);
                    last_error = Some(e);
                }
            }
        }

        if lists.is_empty() {
            return Err(last_error.unwrap_or_else(|| {
                CapabilityError::Unavailable("no evidence backends configured".to_string())
            }));
        }

        let mut seen = HashSet::new();
        let mut merged = Vec::with_capacity(top_k);
        while merged.len() < top_k {
            let mut progressed = false;
            for list in lists.iter_mut() {
                if merged.len() >= top_k {
                    break;
                }
                if let Some(snippet) = list.next() {
                    progressed = true;
                    if seen.insert(snippet.snippet_id.clone()) {
                        merged.push(snippet);
                    }
                }
            }
            if !progressed {
                break;
            }
        }

        for (rank, snippet) in merged.iter_mut().enumerate() {
            snippet.relevance = 1.0 / (rank as f64 + 1.0);
        }
        debug!("Interleaved {} snippets from '{}'", merged.len(), self.name);
        Ok(merged)
    }
}
