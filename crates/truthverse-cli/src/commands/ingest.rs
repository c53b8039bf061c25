//! Ingest command implementation.

use crate::cli::IngestArgs;
use crate::error::Result;
use crate::output::Formatter;
use std::fs;
use std::path::Path;
use tracing::info;
use truthverse_store::{DocumentRecord, IngestSummary, SqliteCorpus};

/// Execute the ingest command.
pub fn execute_ingest(args: IngestArgs, database: &Path, formatter: &Formatter) -> Result<()> {
    let records = read_records(&args.file)?;
    let corpus = SqliteCorpus::new(database)?;

    let summaries = ingest_records(&corpus, &records)?;
    info!(
        "Corpus at {} now holds {} snippets",
        database.display(),
        corpus.snippet_count()?
    );

    println!("{}", formatter.ingest_result(&summaries));
    Ok(())
}

/// Read a JSON array of document records.
fn read_records(path: &Path) -> Result<Vec<DocumentRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Ingest every record, stopping at the first failure.
fn ingest_records(corpus: &SqliteCorpus, records: &[DocumentRecord]) -> Result<Vec<IngestSummary>> {
    let mut summaries = Vec::with_capacity(records.len());
    for record in records {
        summaries.push(corpus.ingest_document(record)?);
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RECORDS: &str = r#"[
        {"source": "Health Wire", "domain": "healthwire.example", "trust": 0.9,
         "url": "https://healthwire.example/a", "title": "Trial",
         "body": "Vaccines reduce hospitalization in adults. Short one."},
        {"source": "Health Wire", "title": "Follow-up",
         "body": "A second study confirmed the earlier result."}
    ]"#;

    #[test]
    fn test_read_and_ingest_records() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", RECORDS).unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].trust, None);

        let corpus = SqliteCorpus::in_memory().unwrap();
        let summaries = ingest_records(&corpus, &records).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].snippet_count, 1);
        assert_eq!(corpus.snippet_count().unwrap(), 2);
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"source\": 1}}").unwrap();
        assert!(matches!(
            read_records(file.path()),
            Err(CliError::Serialization(_))
        ));
    }
}
