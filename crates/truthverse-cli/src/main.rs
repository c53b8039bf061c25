//! TruthVerse CLI - Command-line interface for the TruthVerse claim verifier.

use clap::Parser;
use truthverse_cli::commands;
use truthverse_cli::{build_verifier, ApiKeys, Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> truthverse_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config from the given path or the default location
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let database = match &cli.database {
        Some(path) => path.clone(),
        None => config.database_path()?,
    };

    // Handle commands
    match cli.command {
        Command::Verify(args) => {
            // Reject bad input before opening the corpus
            let input = commands::verify::resolve_input(args)?;
            let keys = ApiKeys {
                hf: cli.hf_api_key,
                newsapi: cli.newsapi_key,
                factcheck: cli.factcheck_key,
            };
            let verifier = build_verifier(&config, &database, &keys)?;
            commands::execute_verify(input, &verifier, &formatter).await?;
        }
        Command::Extract(args) => {
            commands::execute_extract(args, &config.extractor, &formatter)?;
        }
        Command::Ingest(args) => {
            commands::execute_ingest(args, &database, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
