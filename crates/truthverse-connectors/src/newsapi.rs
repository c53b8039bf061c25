//! NewsAPI connector
//!
//! Searches `/v2/everything`. The API has no lookup by URL, so URL-mode
//! fetches search for the URL text and take the first article.

use crate::base::{block_on_current, cache_key, domain_of, ConnectorHealth, NormalizedItem, ResponseCache};
use crate::config::ConnectorConfig;
use crate::error::ConnectorError;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};
use truthverse_domain::{CapabilityError, DocumentFetcher, FetchedDocument};

const NAME: &str = "newsapi";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    #[serde(default)]
    source: Option<ArticleSource>,
    url: Option<String>,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// NewsAPI client implementing the document fetch capability
pub struct NewsApiConnector {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
    cache: ResponseCache,
    health: ConnectorHealth,
}

impl NewsApiConnector {
    /// Create a connector; without an API key every call returns nothing
    pub fn new(config: &ConnectorConfig, api_key: Option<String>) -> Result<Self, ConnectorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConnectorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: config.newsapi_base_url.trim_end_matches('/').to_string(),
            client,
            cache: ResponseCache::new(
                Duration::from_secs(config.news_cache_ttl_secs),
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

    /// Search articles by relevancy
    ///
    /// Returns an empty list when no key is configured.
    pub async fn search(&self, query: &str) -> Result<Vec<NormalizedItem>, ConnectorError> {
        let Some(api_key) = &self.api_key else {
            return Ok(Vec::new());
        };
        self.health.check()?;

        let key = cache_key(NAME, "search", &[("q", query), ("page", "1")]);
        if let Some(items) = self.cache.get(&key) {
            debug!("NewsAPI cache hit for '{}'", query);
            return Ok(items);
        }

        match self.fetch(api_key, query).await {
            Ok(items) => {
                self.health.record_success();
                info!("NewsAPI returned {} articles for '{}'", items.len(), query);
                self.cache.insert(key, items.clone());
                Ok(items)
            }
            Err(e) => {
                error!("NewsAPI search error: {}", e);
                self.health.record_failure();
                Err(e)
            }
        }
    }

    async fn fetch(&self, api_key: &str, query: &str) -> Result<Vec<NormalizedItem>, ConnectorError> {
        let url = format!("{}/everything", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("sortBy", "relevancy"),
                ("pageSize", "100"),
                ("page", "1"),
                ("language", "en"),
                ("apiKey", api_key),
            ])
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
        parse_articles(&body)
    }
}

/// Normalize an `/everything` response body
///
/// Articles without a URL or title are skipped. The body is the description,
/// or the content when the description is empty.
pub fn parse_articles(body: &str) -> Result<Vec<NormalizedItem>, ConnectorError> {
    let response: EverythingResponse =
        serde_json::from_str(body).map_err(|e| ConnectorError::Parse(e.to_string()))?;

    let items = response
        .articles
        .into_iter()
        .filter_map(|article| {
            let url = article.url.filter(|u| !u.is_empty())?;
            let title = article.title.filter(|t| !t.is_empty())?;
            let body_text = article
                .description
                .filter(|d| !d.is_empty())
                .or(article.content)
                .unwrap_or_default();

            Some(NormalizedItem {
                source_name: article
                    .source
                    .and_then(|s| s.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                source_domain: domain_of(&url),
                url,
                title,
                body_text,
                published_at: article.published_at,
            })
        })
        .collect();

    Ok(items)
}

impl DocumentFetcher for NewsApiConnector {
    fn name(&self) -> &str {
        NAME
    }

    fn fetch_or_search(&self, url: &str) -> Result<Option<FetchedDocument>, CapabilityError> {
        let items = block_on_current(self.search(url))??;
        Ok(items.into_iter().next().map(|item| FetchedDocument {
            title: item.title,
            body_text: item.body_text,
            url: Some(item.url),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "status": "ok",
        "totalResults": 3,
        "articles": [
            {"source": {"id": null, "name": "Reuters"},
             "url": "https://www.reuters.com/health/masks",
             "title": "Masks cut transmission",
             "description": "A large trial found masks reduce spread.",
             "content": "Full text...",
             "publishedAt": "2024-03-01T10:00:00Z"},
            {"source": {"name": "Blog"}, "url": "", "title": "No url"},
            {"source": {"name": "Daily"},
             "url": "https://daily.example/a",
             "title": "Only content",
             "description": "",
             "content": "Content body"}
        ]
    }"#;

    #[test]
    fn test_parse_articles() {
        let items = parse_articles(SAMPLE).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].source_name, "Reuters");
        assert_eq!(items[0].source_domain, "www.reuters.com");
        assert_eq!(items[0].body_text, "A large trial found masks reduce spread.");
        assert_eq!(items[0].published_at.as_deref(), Some("2024-03-01T10:00:00Z"));

        assert_eq!(items[1].body_text, "Content body");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_articles("<html>"), Err(ConnectorError::Parse(_))));
        assert!(parse_articles(r#"{"status":"ok"}"#).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_without_key_returns_nothing() {
        let connector = NewsApiConnector::new(&ConnectorConfig::default(), None).unwrap();
        assert!(!connector.is_configured());
        assert!(connector.search("masks").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failures_disable_connector() {
        let config = ConnectorConfig {
            newsapi_base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            max_failures: 2,
            ..ConnectorConfig::default()
        };
        let connector = NewsApiConnector::new(&config, Some("key".to_string())).unwrap();

        assert!(matches!(connector.search("a").await, Err(ConnectorError::Http(_))));
        assert!(matches!(connector.search("b").await, Err(ConnectorError::Http(_))));
        assert!(connector.health().is_disabled());
        assert!(matches!(connector.search("c").await, Err(ConnectorError::Disabled(_))));
    }
}
