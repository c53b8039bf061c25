//! CLI command definitions and argument parsing.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// TruthVerse CLI - Verify factual claims against an evidence corpus.
#[derive(Debug, Parser)]
#[command(name = "truthverse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Corpus database path (overrides the configuration file)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// API key for the hosted stance inference endpoint
    #[arg(long, env = "TRUTHVERSE_HF_API_KEY", hide_env_values = true, global = true)]
    pub hf_api_key: Option<String>,

    /// API key for NewsAPI (URL-mode document search)
    #[arg(long, env = "TRUTHVERSE_NEWSAPI_KEY", hide_env_values = true, global = true)]
    pub newsapi_key: Option<String>,

    /// API key for Google Fact Check Tools (additional evidence)
    #[arg(long, env = "TRUTHVERSE_FACTCHECK_KEY", hide_env_values = true, global = true)]
    pub factcheck_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (labels and scores only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify the claims in a text, a file, or the document behind a URL
    Verify(VerifyArgs),

    /// Extract candidate claims without verifying them
    Extract(ExtractArgs),

    /// Load documents into the evidence corpus
    Ingest(IngestArgs),

    /// Show or initialise the configuration file
    Config(ConfigArgs),
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
#[command(group(ArgGroup::new("input").args(["text", "url", "file"])))]
pub struct VerifyArgs {
    /// Text to verify
    #[arg(short, long)]
    pub text: Option<String>,

    /// URL of a document to verify
    #[arg(short, long)]
    pub url: Option<String>,

    /// File containing the text to verify
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Text to extract claims from
    pub text: String,

    /// Maximum number of claims
    #[arg(short, long, default_value = "10")]
    pub max_claims: usize,
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// JSON file holding an array of document records
    pub file: PathBuf,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_text_command() {
        let cli = Cli::parse_from(["truthverse", "verify", "--text", "The FDA approved it."]);
        match cli.command {
            Command::Verify(args) => {
                assert_eq!(args.text.as_deref(), Some("The FDA approved it."));
                assert!(args.url.is_none());
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_verify_inputs_conflict() {
        let result = Cli::try_parse_from([
            "truthverse",
            "verify",
            "--text",
            "a",
            "--url",
            "https://example.org",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "truthverse",
            "-vv",
            "--format",
            "json",
            "extract",
            "Study shows x.",
            "--max-claims",
            "3",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Extract(args) => assert_eq!(args.max_claims, 3),
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["truthverse", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected Config Init command"),
        }
    }
}
