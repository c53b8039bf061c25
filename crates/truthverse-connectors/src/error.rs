//! Error types for third-party connectors

use thiserror::Error;
use truthverse_domain::CapabilityError;

/// Errors that can occur while talking to a third-party API
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success status code
    #[error("HTTP {status}: {message}")]
    Status {
        /// Status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Connector disabled after repeated failures
    #[error("Connector '{0}' is disabled")]
    Disabled(String),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ConnectorError> for CapabilityError {
    fn from(err: ConnectorError) -> Self {
        match err {
            ConnectorError::Disabled(_) => CapabilityError::Unavailable(err.to_string()),
            ConnectorError::Parse(msg) => CapabilityError::InvalidResponse(msg),
            other => CapabilityError::Failed(other.to_string()),
        }
    }
}
