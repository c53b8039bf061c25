//! Hosted inference provider
//!
//! Calls a text-classification model on a Hugging Face style inference
//! endpoint with the claim and evidence joined by a `[SEP]` marker.
//!
//! # Features
//!
//! - Async HTTP communication with bearer authentication
//! - Retry logic with exponential backoff on transport errors and 5xx
//! - Accepts both flat `[{label, score}]` and nested `[[{label, score}]]`
//!   response shapes
//!
//! # Examples
//!
//! ```no_run
//! use truthverse_nli::{HfInferenceModel, StanceConfig};
//!
//! let model = HfInferenceModel::from_config(&StanceConfig::default(), Some("hf_xxx".to_string()))
//!     .unwrap();
//! ```

use crate::config::StanceConfig;
use crate::error::NliError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use truthverse_domain::{CapabilityError, RawStance, StanceModel};

/// Default number of attempts per call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Inference client for a hosted text-pair classification model
pub struct HfInferenceModel {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
    max_retries: u32,
    retry_base_delay: Duration,
}

/// Request body for the inference API
#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Response from the inference API
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Flat(Vec<LabelScore>),
    Nested(Vec<Vec<LabelScore>>),
}

impl HfInferenceModel {
    /// Create a new inference client
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api-inference.huggingface.co")
    /// - `model`: Model id (e.g., "facebook/bart-large-mnli")
    /// - `api_key`: Bearer token, if the endpoint requires one
    /// - `request_timeout`: Per-request HTTP timeout
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, NliError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| NliError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: Duration::from_secs(1),
        })
    }

    /// Create a client from the stance configuration
    pub fn from_config(config: &StanceConfig, api_key: Option<String>) -> Result<Self, NliError> {
        Ok(Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            config.request_timeout(),
        )?
        .with_max_retries(config.max_retries))
    }

    /// Set the maximum number of attempts per call
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the first backoff delay; later delays double
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }

    /// Classify a (claim, evidence) pair
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The model does not exist on the endpoint (404)
    /// - The endpoint is rate limiting (429)
    /// - Every attempt failed with a transport error or 5xx
    /// - The response body has an unexpected shape
    pub async fn infer(&self, claim: &str, evidence: &str) -> Result<RawStance, NliError> {
        let url = self.url();
        let input = format!("{} [SEP] {}", claim, evidence);
        let body = InferenceRequest { inputs: &input };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let mut request = self.client.post(&url).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let text = response.text().await.map_err(|e| {
                            NliError::InvalidResponse(format!("Failed to read body: {}", e))
                        })?;
                        return parse_response(&text);
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(NliError::ModelNotAvailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        return Err(NliError::RateLimitExceeded);
                    } else if status.is_client_error() {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        return Err(NliError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(NliError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(NliError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = self.retry_base_delay * 2u32.pow(attempts - 1);
                debug!("Inference attempt {} failed, retrying in {:?}", attempts, delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| NliError::Communication("Max retries exceeded".to_string())))
    }
}

impl StanceModel for HfInferenceModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    /// Blocking bridge over [`HfInferenceModel::infer`]
    ///
    /// Must run on a runtime's blocking pool (`spawn_blocking`), where the
    /// current handle may block.
    fn classify_pair(&self, claim: &str, evidence: &str) -> Result<RawStance, CapabilityError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| {
            CapabilityError::Unavailable("no async runtime for inference client".to_string())
        })?;
        handle.block_on(self.infer(claim, evidence)).map_err(|e| {
            warn!("Inference call to '{}' failed: {}", self.model, e);
            CapabilityError::from(e)
        })
    }
}

/// Parse an inference response body into the highest-scoring label
pub fn parse_response(body: &str) -> Result<RawStance, NliError> {
    let parsed: InferenceResponse = serde_json::from_str(body).map_err(|e| {
        NliError::InvalidResponse(format!("Failed to parse response: {}", e))
    })?;

    let candidates = match parsed {
        InferenceResponse::Flat(labels) => labels,
        InferenceResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
    };

    candidates
        .into_iter()
        .filter(|c| c.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|best| RawStance {
            label: best.label,
            confidence: best.score,
        })
        .ok_or_else(|| NliError::InvalidResponse("Response contained no labels".to_string()))
}
