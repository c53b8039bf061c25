//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use truthverse_domain::{Claim, CredibilityLabel};
use truthverse_store::IngestSummary;
use truthverse_verifier::VerificationReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Maximum characters of claim or snippet text shown in a table cell.
const CELL_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a verification report.
    pub fn format_report(&self, report: &VerificationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(report
                .claims
                .iter()
                .map(|c| format!("{}\t{:.1}\t{}", c.label, c.cred_score, c.id.short()))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_report_table(&self, report: &VerificationReport) -> String {
        if report.claims.is_empty() {
            return self.warning("No verified information available for this input.");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Claim", "Score", "Label", "Support", "Contradict", "Neutral"]);
        for verdict in &report.claims {
            builder.push_record([
                verdict.id.short().to_string(),
                truncate(&verdict.claim_text),
                format!("{:.1}", verdict.cred_score),
                self.label(verdict.label),
                verdict.breakdown.supporting.to_string(),
                verdict.breakdown.contradicting.to_string(),
                verdict.breakdown.neutral.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut out = table.to_string();
        for verdict in &report.claims {
            out.push_str(&format!("\n\n{}: {}", verdict.id.short(), verdict.explanation));
            for item in &verdict.evidence {
                out.push_str(&format!(
                    "\n  [{} {:.2}] {} ({})",
                    item.stance.as_str(),
                    item.confidence,
                    truncate(&item.snippet),
                    item.url.as_deref().unwrap_or(&item.source)
                ));
            }
        }
        out.push_str(&format!(
            "\n\n{}",
            self.info(&format!(
                "{} claim(s), {} source(s) checked in {} ms",
                report.claims.len(),
                report.checked_sources,
                report.processing_time_ms
            ))
        ));
        out
    }

    /// Format extracted claims.
    pub fn format_claims(&self, claims: &[Claim]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(claims)?),
            OutputFormat::Quiet => Ok(claims
                .iter()
                .map(|c| c.canonical_text.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if claims.is_empty() {
                    return Ok(self.colorize("No claims found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Hash", "Claim"]);
                for (i, claim) in claims.iter().enumerate() {
                    builder.push_record([
                        (i + 1).to_string(),
                        claim.id.short().to_string(),
                        truncate(&claim.canonical_text),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format the result of an ingest run.
    pub fn ingest_result(&self, summaries: &[IngestSummary]) -> String {
        let snippets: usize = summaries.iter().map(|s| s.snippet_count).sum();
        self.success(&format!(
            "Ingested {} document(s), {} snippet(s)",
            summaries.len(),
            snippets
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn label(&self, label: CredibilityLabel) -> String {
        let color = match label {
            CredibilityLabel::Verified => "green",
            CredibilityLabel::Fake => "red",
            CredibilityLabel::NeedsReview => "yellow",
        };
        self.colorize(label.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= CELL_WIDTH {
        return text.to_string();
    }
    let cut: String = text.chars().take(CELL_WIDTH - 1).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use truthverse_domain::{ClaimId, EvidenceBreakdown, Stance};
    use truthverse_verifier::{ClaimVerdict, EvidenceItem};

    fn report() -> VerificationReport {
        let mut report = VerificationReport::empty(12);
        report.checked_sources = 3;
        report.claims.push(ClaimVerdict {
            id: ClaimId::from_digest("0123456789abcdef0123"),
            claim_text: "the fda approved the drug".to_string(),
            cred_score: 77.5,
            label: CredibilityLabel::Verified,
            explanation: "This claim is VERIFIED with 78% confidence.".to_string(),
            breakdown: EvidenceBreakdown {
                supporting: 2,
                contradicting: 0,
                neutral: 1,
            },
            evidence: vec![EvidenceItem {
                snippet: "The FDA approved the drug in May.".to_string(),
                source: "Health Wire".to_string(),
                stance: Stance::Support,
                confidence: 0.9,
                url: Some("https://healthwire.example/fda".to_string()),
            }],
        });
        report
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&report()).unwrap();
        assert!(output.contains("Claim"));
        assert!(output.contains("verified"));
        assert!(output.contains("[support 0.90]"));
        assert!(output.contains("3 source(s) checked"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["claims"][0]["cred_score"], 77.5);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_report(&report()).unwrap();
        assert_eq!(output, "verified\t77.5\t0123456789ab");
    }

    #[test]
    fn test_empty_report() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&VerificationReport::empty(0)).unwrap();
        assert!(output.contains("No verified information available"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        let long = "x".repeat(100);
        assert_eq!(truncate(&long).chars().count(), CELL_WIDTH);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
