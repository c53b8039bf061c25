//! Google Fact Check Tools connector
//!
//! Each published claim review becomes one evidence snippet reading
//! `"{review title} - {textual rating}"`, attributed to the reviewing
//! publisher.

use crate::base::{block_on_current, cache_key, ConnectorHealth, NormalizedItem, ResponseCache};
use crate::config::ConnectorConfig;
use crate::error::ConnectorError;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};
use truthverse_domain::{CapabilityError, EvidenceSearch, EvidenceSnippet};

const NAME: &str = "factcheck";
const PAGE_SIZE: &str = "10";

#[derive(Debug, Deserialize)]
struct ClaimsResponse {
    #[serde(default)]
    claims: Vec<ClaimEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimEntry {
    #[serde(default)]
    text: String,
    #[serde(default)]
    claim_review: Vec<ClaimReview>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimReview {
    #[serde(default)]
    publisher: Option<Publisher>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    textual_rating: String,
    review_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Publisher {
    name: Option<String>,
    site: Option<String>,
}

/// Fact Check Tools client implementing the evidence search capability
pub struct FactCheckConnector {
    api_key: Option<String>,
    base_url: String,
    trust: f64,
    client: reqwest::Client,
    cache: ResponseCache,
    health: ConnectorHealth,
}

impl FactCheckConnector {
    /// Create a connector; without an API key every search returns nothing
    pub fn new(config: &ConnectorConfig, api_key: Option<String>) -> Result<Self, ConnectorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConnectorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: config.factcheck_base_url.trim_end_matches('/').to_string(),
            trust: config.factcheck_trust.clamp(0.0, 1.0),
            client,
            cache: ResponseCache::new(
                Duration::from_secs(config.factcheck_cache_ttl_secs),
                config.cache_capacity,
            ),
            health: ConnectorHealth::new(NAME, config.max_failures),
        })
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Failure circuit of this connector
    pub fn health(&self) -> &ConnectorHealth {
        &self.health
    }

    /// Search published claim reviews
    pub async fn search_reviews(&self, query: &str) -> Result<Vec<NormalizedItem>, ConnectorError> {
        let Some(api_key) = &self.api_key else {
            return Ok(Vec::new());
        };
        self.health.check()?;

        let key = cache_key(NAME, "search", &[("query", query), ("page", "1")]);
        if let Some(items) = self.cache.get(&key) {
            debug!("FactCheck cache hit for '{}'", query);
            return Ok(items);
        }

        match self.fetch(api_key, query).await {
            Ok(items) => {
                self.health.record_success();
                info!("FactCheck returned {} reviews for '{}'", items.len(), query);
                self.cache.insert(key, items.clone());
                Ok(items)
            }
            Err(e) => {
                error!("Google FactCheck search error: {}", e);
                self.health.record_failure();
                Err(e)
            }
        }
    }

    async fn fetch(&self, api_key: &str, query: &str) -> Result<Vec<NormalizedItem>, ConnectorError> {
        let url = format!("{}/claims:search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("key", api_key), ("query", query), ("pageSize", PAGE_SIZE)])
            .send()
            .await
            .map_err(|e| ConnectorError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ConnectorError::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(ConnectorError::Status {
                status: status.as_u16(),
                message: body,
            });
        }
        parse_claims(&body)
    }

    /// Project normalized reviews into ranked snippets
    fn to_snippets(&self, items: Vec<NormalizedItem>, top_k: usize) -> Vec<EvidenceSnippet> {
        items
            .into_iter()
            .take(top_k)
            .enumerate()
            .map(|(rank, item)| {
                let digest = cache_key(
                    NAME,
                    "item",
                    &[("url", &item.url), ("text", &item.body_text)],
                );
                EvidenceSnippet {
                    snippet_id: format!("{}:{}", NAME, digest),
                    text: item.body_text,
                    document_id: None,
                    source_id: Some(item.source_domain.clone()),
                    source_name: item.source_name,
                    source_domain: Some(item.source_domain),
                    url: Some(item.url).filter(|u| !u.is_empty()),
                    source_trust: self.trust,
                    relevance: 1.0 / (rank as f64 + 1.0),
                }
            })
            .collect()
    }
}

/// Normalize a `claims:search` response body
///
/// Only the first review of each claim is used; claims without reviews are
/// skipped.
pub fn parse_claims(body: &str) -> Result<Vec<NormalizedItem>, ConnectorError> {
    let response: ClaimsResponse =
        serde_json::from_str(body).map_err(|e| ConnectorError::Parse(e.to_string()))?;

    let items = response
        .claims
        .into_iter()
        .filter_map(|claim| {
            let review = claim.claim_review.into_iter().next()?;
            let (name, site) = match review.publisher {
                Some(p) => (p.name, p.site),
                None => (None, None),
            };
            Some(NormalizedItem {
                source_name: name.unwrap_or_else(|| "Unknown".to_string()),
                source_domain: site.unwrap_or_else(|| "factcheck.org".to_string()),
                url: review.url,
                title: claim.text,
                body_text: format!("{} - {}", review.title, review.textual_rating),
                published_at: review.review_date,
            })
        })
        .collect();

    Ok(items)
}

impl EvidenceSearch for FactCheckConnector {
    fn name(&self) -> &str {
        NAME
    }

    fn search(&self, query: &str, top_k: usize) -> Result<Vec<EvidenceSnippet>, CapabilityError> {
        let items = block_on_current(self.search_reviews(query))??;
        Ok(self.to_snippets(items, top_k))
    }
}
