//! Core Verifier implementation

use crate::config::VerifierConfig;
use crate::error::VerifierError;
use crate::types::{ClaimVerdict, EvidenceItem, VerificationReport};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use truthverse_domain::{
    compute_credibility, CapabilityError, Claim, DocumentFetcher, EvidenceSnippet,
    FetchedDocument, Stance, StanceJudgment, WeightedEvidence,
};
use truthverse_extractor::ClaimExtractor;
use truthverse_nli::StanceClassifier;
use truthverse_retriever::HybridRetriever;
use uuid::Uuid;

/// Claim verification pipeline: extract, retrieve, classify, score
///
/// The verifier holds no per-request state; one instance can serve
/// concurrent requests.
pub struct Verifier {
    extractor: ClaimExtractor,
    retriever: HybridRetriever,
    classifier: StanceClassifier,
    fetchers: Vec<Arc<dyn DocumentFetcher>>,
    config: VerifierConfig,
}

impl Verifier {
    /// Assemble a verifier from its stages
    pub fn new(
        extractor: ClaimExtractor,
        retriever: HybridRetriever,
        classifier: StanceClassifier,
        config: VerifierConfig,
    ) -> Result<Self, VerifierError> {
        config.validate().map_err(VerifierError::Config)?;

        Ok(Self {
            extractor,
            retriever,
            classifier,
            fetchers: Vec::new(),
            config,
        })
    }

    /// Append a document fetcher to the URL-mode chain
    ///
    /// Fetchers are tried in the order they were added.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        self.fetchers.push(fetcher);
        self
    }

    /// Get the verifier configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Get the stance classifier
    pub fn classifier(&self) -> &StanceClassifier {
        &self.classifier
    }

    /// Verify the claims found in `text`
    ///
    /// Never fails. Extraction failure yields an empty report; a claim whose
    /// processing fails is dropped and the rest are still reported.
    pub async fn verify_text(&self, text: &str) -> VerificationReport {
        self.verify_text_since(text, Instant::now()).await
    }

    /// Verify the document found for `url`
    ///
    /// The fetcher chain is walked until one returns a document; its title and
    /// body are then verified as text. No document yields an empty report.
    pub async fn verify_url(&self, url: &str) -> VerificationReport {
        let start = Instant::now();

        match self.fetch_document(url).await {
            Some(document) => {
                self.verify_text_since(&document.combined_text(), start)
                    .await
            }
            None => {
                info!("No document found for {}", url);
                VerificationReport::empty(elapsed_ms(start))
            }
        }
    }

    async fn verify_text_since(&self, text: &str, start: Instant) -> VerificationReport {
        let request_id = Uuid::now_v7();

        let claims = match self.extractor.extract(text, self.config.extraction_max_claims) {
            Ok(claims) => select_claims(claims, self.config.max_claims_per_request),
            Err(e) => {
                warn!("Claim extraction failed for request {}: {}", request_id, e);
                return VerificationReport {
                    request_id,
                    ..VerificationReport::empty(elapsed_ms(start))
                };
            }
        };

        let mut sources = HashSet::new();
        let mut verdicts = Vec::with_capacity(claims.len());

        for claim in &claims {
            let snippets = self
                .retriever
                .retrieve(&claim.canonical_text, self.config.evidence_top_k)
                .await;
            sources.extend(snippets.iter().map(|s| s.source_key().to_string()));

            match self.verify_claim(claim, snippets).await {
                Ok(verdict) => {
                    debug!(
                        "Claim {} scored {} ({})",
                        claim.id.short(),
                        verdict.cred_score,
                        verdict.label
                    );
                    verdicts.push(verdict);
                }
                Err(e) => warn!("Skipping claim {}: {}", claim.id.short(), e),
            }
        }

        let report = VerificationReport {
            request_id,
            claims: verdicts,
            processing_time_ms: elapsed_ms(start),
            checked_sources: sources.len(),
        };
        info!(
            "Request {} verified {}/{} claims against {} sources in {} ms",
            report.request_id,
            report.claims.len(),
            claims.len(),
            report.checked_sources,
            report.processing_time_ms
        );
        report
    }

    /// Classify the top snippets, partition by stance, and score
    pub(crate) async fn verify_claim(
        &self,
        claim: &Claim,
        snippets: Vec<EvidenceSnippet>,
    ) -> Result<ClaimVerdict, VerifierError> {
        let checked: Vec<EvidenceSnippet> = snippets
            .into_iter()
            .take(self.config.max_stance_checks)
            .collect();
        let judgments = self.classify_all(&claim.canonical_text, &checked).await?;

        let mut supporting = Vec::new();
        let mut contradicting = Vec::new();
        let mut neutral = Vec::new();
        let mut evidence = Vec::new();

        for (snippet, judgment) in checked.into_iter().zip(judgments) {
            let weighted = WeightedEvidence::new(judgment.confidence, snippet.source_trust);
            match judgment.stance {
                Stance::Support => supporting.push(weighted),
                Stance::Contradict => contradicting.push(weighted),
                Stance::Neutral => {
                    neutral.push(weighted);
                    continue;
                }
            }
            evidence.push(EvidenceItem {
                snippet: snippet.text,
                source: snippet.source_name,
                stance: judgment.stance,
                confidence: judgment.confidence,
                url: snippet.url,
            });
        }
        evidence.truncate(self.config.max_evidence_in_result);

        let score = compute_credibility(
            &supporting,
            &contradicting,
            &neutral,
            &self.config.thresholds,
        )?;

        Ok(ClaimVerdict {
            id: claim.id.clone(),
            claim_text: claim.canonical_text.clone(),
            cred_score: score.score,
            label: score.label,
            explanation: score.explanation,
            breakdown: score.breakdown,
            evidence,
        })
    }

    /// Classify every snippet against the claim concurrently, in input order
    async fn classify_all(
        &self,
        claim: &str,
        snippets: &[EvidenceSnippet],
    ) -> Result<Vec<StanceJudgment>, VerifierError> {
        let mut tasks = JoinSet::new();
        for (index, snippet) in snippets.iter().enumerate() {
            let classifier = self.classifier.clone();
            let claim = claim.to_string();
            let evidence = snippet.text.clone();
            tasks.spawn(async move { (index, classifier.classify(&claim, &evidence).await) });
        }

        let mut judgments: Vec<Option<StanceJudgment>> = (0..snippets.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (index, judgment) = joined.map_err(|e| VerifierError::Task(e.to_string()))?;
            judgments[index] = Some(judgment);
        }

        Ok(judgments.into_iter().flatten().collect())
    }

    /// Walk the fetcher chain; each call runs on the blocking pool under the
    /// fetch timeout
    async fn fetch_document(&self, url: &str) -> Option<FetchedDocument> {
        if url.trim().is_empty() {
            return None;
        }

        for fetcher in &self.fetchers {
            let backend = Arc::clone(fetcher);
            let target = url.to_string();
            let task = tokio::task::spawn_blocking(move || backend.fetch_or_search(&target));

            let result = match timeout(self.config.fetch_timeout(), task).await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => Err(CapabilityError::Failed(format!("Task join error: {}", e))),
                Err(_) => Err(CapabilityError::Timeout(self.config.fetch_timeout_ms)),
            };

            match result {
                Ok(Some(document)) => {
                    info!("Fetcher '{}' found a document for {}", fetcher.name(), url);
                    return Some(document);
                }
                Ok(None) => debug!("Fetcher '{}' found nothing for {}", fetcher.name(), url),
                Err(e) => warn!("Fetcher '{}' failed for {}: {}", fetcher.name(), url, e),
            }
        }

        None
    }
}

/// Keep the first claim of each id, up to `max` claims
pub(crate) fn select_claims(claims: Vec<Claim>, max: usize) -> Vec<Claim> {
    let mut seen = HashSet::new();
    claims
        .into_iter()
        .filter(|claim| seen.insert(claim.id.clone()))
        .take(max)
        .collect()
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
