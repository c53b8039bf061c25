//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus error
    #[error("Corpus error: {0}")]
    Store(#[from] truthverse_store::StoreError),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extraction(#[from] truthverse_extractor::ExtractorError),

    /// Retriever construction error
    #[error("Retriever error: {0}")]
    Retriever(#[from] truthverse_retriever::RetrieverError),

    /// Inference client error
    #[error("Inference error: {0}")]
    Nli(#[from] truthverse_nli::NliError),

    /// Connector error
    #[error("Connector error: {0}")]
    Connector(#[from] truthverse_connectors::ConnectorError),

    /// Verifier construction error
    #[error("Verifier error: {0}")]
    Verifier(#[from] truthverse_verifier::VerifierError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
