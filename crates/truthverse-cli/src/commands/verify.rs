//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use truthverse_verifier::Verifier;

/// What the verify command was asked to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyInput {
    /// Inline or file text
    Text(String),
    /// Document URL
    Url(String),
}

/// Resolve the verify arguments into a single input.
///
/// Empty text and a missing input are rejected before the pipeline runs.
pub fn resolve_input(args: VerifyArgs) -> Result<VerifyInput> {
    let input = match (args.text, args.url, args.file) {
        (Some(text), _, _) => VerifyInput::Text(text),
        (_, Some(url), _) => VerifyInput::Url(url),
        (_, _, Some(path)) => VerifyInput::Text(fs::read_to_string(path)?),
        (None, None, None) => {
            return Err(CliError::InvalidInput(
                "Provide one of --text, --url or --file".to_string(),
            ))
        }
    };

    match &input {
        VerifyInput::Text(text) if text.trim().is_empty() => {
            Err(CliError::InvalidInput("Text to verify is empty".to_string()))
        }
        VerifyInput::Url(url) if url.trim().is_empty() => {
            Err(CliError::InvalidInput("URL to verify is empty".to_string()))
        }
        _ => Ok(input),
    }
}

/// Execute the verify command.
pub async fn execute_verify(
    input: VerifyInput,
    verifier: &Verifier,
    formatter: &Formatter,
) -> Result<()> {
    let report = match input {
        VerifyInput::Text(text) => verifier.verify_text(&text).await,
        VerifyInput::Url(url) => verifier.verify_url(&url).await,
    };

    println!("{}", formatter.format_report(&report)?);
    Ok(())
}
