//! Stance classifier strategy

use crate::config::StanceConfig;
use crate::heuristic::{explain, heuristic_stance};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};
use truthverse_domain::{CapabilityError, RawStance, Stance, StanceJudgment, StanceModel};

/// Stance classification strategy, chosen once at construction
///
/// `Inference` asks a model and falls back to the heuristic on any failure;
/// `Heuristic` always uses keyword overlap. [`classify`](Self::classify) never
/// fails.
#[derive(Clone)]
pub enum StanceClassifier {
    /// Model-backed classification with heuristic fallback
    Inference {
        /// The text-pair classification capability
        model: Arc<dyn StanceModel>,
        /// Budget for one model call
        timeout: Duration,
    },
    /// Keyword-overlap heuristic only
    Heuristic,
}

impl StanceClassifier {
    /// Model-backed classifier using the configured timeout
    pub fn inference(model: Arc<dyn StanceModel>, config: &StanceConfig) -> Self {
        StanceClassifier::Inference {
            model,
            timeout: config.inference_timeout(),
        }
    }

    /// Heuristic-only classifier
    pub fn heuristic() -> Self {
        StanceClassifier::Heuristic
    }

    /// Pick the strategy by availability of a model
    pub fn from_optional(model: Option<Arc<dyn StanceModel>>, config: &StanceConfig) -> Self {
        match model {
            Some(model) => Self::inference(model, config),
            None => Self::heuristic(),
        }
    }

    /// Whether this classifier calls a model
    pub fn is_inference(&self) -> bool {
        matches!(self, StanceClassifier::Inference { .. })
    }

    /// Name for logs and reports
    pub fn describe(&self) -> String {
        match self {
            StanceClassifier::Inference { model, .. } => format!("inference:{}", model.model_name()),
            StanceClassifier::Heuristic => "heuristic".to_string(),
        }
    }

    /// Classify the stance of `evidence` towards `claim`
    pub async fn classify(&self, claim: &str, evidence: &str) -> StanceJudgment {
        match self {
            StanceClassifier::Heuristic => heuristic_stance(claim, evidence),
            StanceClassifier::Inference { model, timeout } => {
                match call_model(Arc::clone(model), claim, evidence, *timeout).await {
                    Ok(raw) => judgment_from_raw(&raw),
                    Err(e) => {
                        warn!(
                            "Stance model '{}' failed, using fallback: {}",
                            model.model_name(),
                            e
                        );
                        heuristic_stance(claim, evidence)
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for StanceClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Run the model on the blocking pool under `limit`
async fn call_model(
    model: Arc<dyn StanceModel>,
    claim: &str,
    evidence: &str,
    limit: Duration,
) -> Result<RawStance, CapabilityError> {
    let claim = claim.to_string();
    let evidence = evidence.to_string();
    let task = tokio::task::spawn_blocking(move || model.classify_pair(&claim, &evidence));

    let raw = timeout(limit, task)
        .await
        .map_err(|_| CapabilityError::Timeout(limit.as_millis() as u64))?
        .map_err(|e| CapabilityError::Failed(format!("Task join error: {}", e)))??;

    if !raw.confidence.is_finite() {
        return Err(CapabilityError::InvalidResponse(format!(
            "non-finite confidence for label '{}'",
            raw.label
        )));
    }
    debug!("Model label '{}' at {:.3}", raw.label, raw.confidence);
    Ok(raw)
}

/// Map a raw model output onto a judgment with a templated explanation
fn judgment_from_raw(raw: &RawStance) -> StanceJudgment {
    let stance = Stance::from_label(&raw.label);
    let confidence = raw.confidence.clamp(0.0, 1.0);
    StanceJudgment::new(stance, confidence, explain(stance, confidence))
}
