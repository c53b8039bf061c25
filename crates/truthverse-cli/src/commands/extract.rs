//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::output::Formatter;
use truthverse_extractor::{ClaimExtractor, ExtractorConfig};

/// Execute the extract command.
pub fn execute_extract(
    args: ExtractArgs,
    config: &ExtractorConfig,
    formatter: &Formatter,
) -> Result<()> {
    let extractor = ClaimExtractor::new(config.clone())?;
    let claims = extractor.extract(&args.text, args.max_claims)?;

    println!("{}", formatter.format_claims(&claims)?);
    Ok(())
}
