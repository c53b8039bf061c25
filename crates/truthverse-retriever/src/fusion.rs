//! Merging of lexical and dense ranked lists

use crate::config::FusionStrategy;
use std::cmp::Ordering;
use std::collections::HashMap;
use truthverse_domain::EvidenceSnippet;

struct Fused {
    snippet: EvidenceSnippet,
    lexical_rank: Option<usize>,
    score: f64,
}

/// Merge two best-first lists into one list of at most `top_k` snippets
///
/// Snippets are matched by `snippet_id`; the lexical copy wins when a snippet
/// appears in both lists. The fused score replaces `relevance`. Ties break by
/// lexical rank (absent ranks last), then by snippet id.
pub fn fuse(
    lexical: Vec<EvidenceSnippet>,
    dense: Vec<EvidenceSnippet>,
    strategy: &FusionStrategy,
    top_k: usize,
) -> Vec<EvidenceSnippet> {
    let lexical_scores = list_scores(&lexical, strategy, Path::Lexical);
    let dense_scores = list_scores(&dense, strategy, Path::Dense);

    let mut merged: HashMap<String, Fused> = HashMap::new();

    for (rank, (snippet, score)) in lexical.into_iter().zip(lexical_scores).enumerate() {
        merged
            .entry(snippet.snippet_id.clone())
            .or_insert(Fused {
                snippet,
                lexical_rank: Some(rank),
                score,
            });
    }

    for (snippet, score) in dense.into_iter().zip(dense_scores) {
        merged
            .entry(snippet.snippet_id.clone())
            .and_modify(|existing| existing.score += score)
            .or_insert(Fused {
                snippet,
                lexical_rank: None,
                score,
            });
    }

    let mut results: Vec<Fused> = merged.into_values().collect();
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| compare_rank(a.lexical_rank, b.lexical_rank))
            .then_with(|| a.snippet.snippet_id.cmp(&b.snippet.snippet_id))
    });
    results.truncate(top_k);

    results
        .into_iter()
        .map(|f| {
            let mut snippet = f.snippet;
            snippet.relevance = f.score;
            snippet
        })
        .collect()
}

#[derive(Clone, Copy)]
enum Path {
    Lexical,
    Dense,
}

/// Per-item contribution of one list under `strategy`
fn list_scores(list: &[EvidenceSnippet], strategy: &FusionStrategy, path: Path) -> Vec<f64> {
    match *strategy {
        FusionStrategy::Weighted {
            lexical_weight,
            dense_weight,
        } => {
            let weight = match path {
                Path::Lexical => lexical_weight,
                Path::Dense => dense_weight,
            };
            let max = list
                .iter()
                .map(|s| s.relevance)
                .filter(|r| r.is_finite())
                .fold(0.0f64, f64::max);
            list.iter()
                .map(|s| {
                    if max > 0.0 && s.relevance.is_finite() {
                        weight * (s.relevance / max).clamp(0.0, 1.0)
                    } else {
                        0.0
                    }
                })
                .collect()
        }
        FusionStrategy::ReciprocalRank { k } => (0..list.len())
            .map(|rank| 1.0 / (k + rank as f64 + 1.0))
            .collect(),
    }
}

fn compare_rank(a: Option<usize>, b: Option<usize>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(id: &str, relevance: f64) -> EvidenceSnippet {
        EvidenceSnippet {
            snippet_id: id.to_string(),
            text: format!("text of {}", id),
            document_id: None,
            source_id: None,
            source_name: "src".to_string(),
            source_domain: None,
            url: None,
            source_trust: 0.5,
            relevance,
        }
    }

    fn ids(list: &[EvidenceSnippet]) -> Vec<&str> {
        list.iter().map(|s| s.snippet_id.as_str()).collect()
    }

    #[test]
    fn test_weighted_merges_shared_ids() {
        let lexical = vec![snippet("a", 10.0), snippet("b", 5.0)];
        let dense = vec![snippet("b", 0.9), snippet("c", 0.45)];
        let strategy = FusionStrategy::Weighted {
            lexical_weight: 0.6,
            dense_weight: 0.4,
        };

        let fused = fuse(lexical, dense, &strategy, 10);
        // a = 0.6, b = 0.3 + 0.4 = 0.7, c = 0.2
        assert_eq!(ids(&fused), vec!["b", "a", "c"]);
        assert!((fused[0].relevance - 0.7).abs() < 1e-9);
        assert!((fused[2].relevance - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_reciprocal_rank() {
        let lexical = vec![snippet("a", 3.0), snippet("b", 2.0)];
        let dense = vec![snippet("b", 0.9), snippet("a", 0.1)];
        let fused = fuse(lexical, dense, &FusionStrategy::ReciprocalRank { k: 60.0 }, 10);

        // equal RRF scores; lexical rank decides
        assert_eq!(ids(&fused), vec!["a", "b"]);
        assert!((fused[0].relevance - (1.0 / 61.0 + 1.0 / 62.0)).abs() < 1e-12);
    }

    #[test]
    fn test_truncates_to_top_k() {
        let lexical = vec![snippet("a", 3.0), snippet("b", 2.0), snippet("c", 1.0)];
        let dense = vec![snippet("d", 0.9)];
        let fused = fuse(lexical, dense, &FusionStrategy::default(), 2);
        assert_eq!(fused.len(), 2);
    }

    #[test]
    fn test_ties_break_by_snippet_id_when_unranked() {
        let dense = vec![snippet("z", 0.5), snippet("m", 0.5)];
        let fused = fuse(Vec::new(), dense, &FusionStrategy::default(), 10);
        assert_eq!(ids(&fused), vec!["m", "z"]);
    }

    #[test]
    fn test_non_positive_relevance_contributes_nothing() {
        let lexical = vec![snippet("a", -1.0), snippet("b", f64::NAN)];
        let fused = fuse(lexical, Vec::new(), &FusionStrategy::default(), 10);
        assert_eq!(ids(&fused), vec!["a", "b"]);
        assert!(fused.iter().all(|s| s.relevance == 0.0));
    }
}
