//! Configuration management for the CLI.
//!
//! One TOML file holds a section per pipeline component. Missing sections
//! and fields take their defaults; API keys never live in the file.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use truthverse_connectors::ConnectorConfig;
use truthverse_extractor::ExtractorConfig;
use truthverse_nli::StanceConfig;
use truthverse_retriever::RetrieverConfig;
use truthverse_store::embedding::DEFAULT_DIMENSION;
use truthverse_verifier::VerifierConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Evidence corpus
    #[serde(default)]
    pub corpus: CorpusSettings,

    /// Claim extractor
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Evidence retriever
    #[serde(default)]
    pub retriever: RetrieverConfig,

    /// Stance classifier
    #[serde(default)]
    pub stance: StanceConfig,

    /// Third-party connectors
    #[serde(default)]
    pub connectors: ConnectorConfig,

    /// Verification orchestrator
    #[serde(default)]
    pub verifier: VerifierConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Evidence corpus settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSettings {
    /// SQLite database path; defaults to `~/.truthverse/corpus.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Build a dense vector index next to full-text search
    #[serde(default = "default_true")]
    pub dense_index: bool,

    /// Embedding dimension of the dense index
    #[serde(default = "default_dimension")]
    pub embedding_dimension: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the directory holding the configuration and the default corpus.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".truthverse"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every component section.
    pub fn validate(&self) -> Result<()> {
        let sections = [
            ("extractor", self.extractor.validate()),
            ("retriever", self.retriever.validate()),
            ("stance", self.stance.validate()),
            ("connectors", self.connectors.validate()),
            ("verifier", self.verifier.validate()),
        ];
        for (name, result) in sections {
            result.map_err(|e| CliError::Config(format!("[{}] {}", name, e)))?;
        }
        if self.corpus.embedding_dimension == 0 {
            return Err(CliError::Config(
                "[corpus] embedding_dimension must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Corpus database path, falling back to `~/.truthverse/corpus.db`.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.corpus.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::home()?.join("corpus.db")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            database: None,
            dense_index: true,
            embedding_dimension: DEFAULT_DIMENSION,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}
