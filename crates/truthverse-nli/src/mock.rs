//! Deterministic stance model for tests and offline runs

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use truthverse_domain::{CapabilityError, RawStance, StanceModel};

#[derive(Debug, Clone)]
enum Canned {
    Label(RawStance),
    Error,
}

/// Mock stance model returning pre-configured labels without network calls
///
/// # Examples
///
/// ```
/// use truthverse_domain::StanceModel;
/// use truthverse_nli::MockStanceModel;
///
/// let mut model = MockStanceModel::new("neutral", 0.5);
/// model.add_response("the sky is blue", "the sky appears blue", "ENTAILMENT", 0.92);
///
/// let raw = model.classify_pair("the sky is blue", "the sky appears blue").unwrap();
/// assert_eq!(raw.label, "ENTAILMENT");
/// assert_eq!(model.classify_pair("x", "y").unwrap().label, "neutral");
/// assert_eq!(model.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockStanceModel {
    default: RawStance,
    responses: Arc<Mutex<HashMap<(String, String), Canned>>>,
    call_count: Arc<Mutex<usize>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockStanceModel {
    /// Create a mock returning `label` with `confidence` for every pair
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            default: RawStance {
                label: label.into(),
                confidence,
            },
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for a (claim, evidence) pair
    pub fn add_response(
        &mut self,
        claim: impl Into<String>,
        evidence: impl Into<String>,
        label: impl Into<String>,
        confidence: f64,
    ) {
        lock(&self.responses).insert(
            (claim.into(), evidence.into()),
            Canned::Label(RawStance {
                label: label.into(),
                confidence,
            }),
        );
    }

    /// Configure to return an error for a specific pair
    pub fn add_error(&mut self, claim: impl Into<String>, evidence: impl Into<String>) {
        lock(&self.responses).insert((claim.into(), evidence.into()), Canned::Error);
    }

    /// Get the number of times classify_pair was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }
}

impl Default for MockStanceModel {
    fn default() -> Self {
        Self::new("neutral", 0.5)
    }
}

impl StanceModel for MockStanceModel {
    fn model_name(&self) -> &str {
        "mock"
    }

    fn classify_pair(&self, claim: &str, evidence: &str) -> Result<RawStance, CapabilityError> {
        *lock(&self.call_count) += 1;

        let responses = lock(&self.responses);
        match responses.get(&(claim.to_string(), evidence.to_string())) {
            Some(Canned::Label(raw)) => Ok(raw.clone()),
            Some(Canned::Error) => Err(CapabilityError::Failed("Mock error".to_string())),
            None => Ok(self.default.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_default_response() {
        let model = MockStanceModel::new("contradiction", 0.8);
        let raw = model.classify_pair("a", "b").unwrap();
        assert_eq!(raw.label, "contradiction");
        assert_eq!(raw.confidence, 0.8);
    }

    #[test]
    fn test_mock_error() {
        let mut model = MockStanceModel::default();
        model.add_error("bad", "pair");
        assert!(model.classify_pair("bad", "pair").is_err());
        assert!(model.classify_pair("good", "pair").is_ok());
    }

    #[test]
    fn test_mock_call_count_shared_between_clones() {
        let model = MockStanceModel::default();
        let clone = model.clone();
        clone.classify_pair("a", "b").unwrap();
        model.classify_pair("a", "b").unwrap();
        assert_eq!(model.call_count(), 2);

        model.reset_call_count();
        assert_eq!(clone.call_count(), 0);
    }
}
