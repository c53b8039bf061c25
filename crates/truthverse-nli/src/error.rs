//! Error types for stance inference

use thiserror::Error;
use truthverse_domain::CapabilityError;

/// Errors that can occur during inference calls
#[derive(Error, Debug)]
pub enum NliError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the inference endpoint
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<NliError> for CapabilityError {
    fn from(err: NliError) -> Self {
        match err {
            NliError::RateLimitExceeded | NliError::ModelNotAvailable(_) => {
                CapabilityError::Unavailable(err.to_string())
            }
            NliError::InvalidResponse(msg) => CapabilityError::InvalidResponse(msg),
            NliError::Communication(_) | NliError::Config(_) => {
                CapabilityError::Failed(err.to_string())
            }
        }
    }
}
