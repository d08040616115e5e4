/*!
 * Reporting functionality for srcbundle
 *
 * Renders the outcome of a bundling run as console messages and tables
 * using the tabled library.
 */

use chrono::Local;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{BundleOutcome, BundleSummary};
use crate::utils::format_file_size;

/// Format of the report output
pub enum ReportFormat {
    /// Status lines followed by entry and summary tables
    ConsoleTable,
    /// Status lines only
    Plain,
}

/// Report generator for bundle outcomes
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string for an outcome
    pub fn generate_report(&self, outcome: &BundleOutcome) -> String {
        match outcome {
            BundleOutcome::Empty => "No files to archive.".to_string(),
            BundleOutcome::Written(summary) => match self.format {
                ReportFormat::Plain => self.status_lines(summary).join("\n"),
                ReportFormat::ConsoleTable => format!(
                    "{}\n{}\n\n{}\n{}",
                    "📋  ARCHIVED FILES",
                    self.create_entries_table(summary),
                    self.status_lines(summary).join("\n"),
                    self.create_summary_table(summary)
                ),
            },
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, outcome: &BundleOutcome) {
        println!("{}", self.generate_report(outcome));
    }

    fn status_lines(&self, summary: &BundleSummary) -> Vec<String> {
        let mut lines = vec![format!(
            "Files have been archived into: {}",
            summary.output_file.display()
        )];
        if summary.archive.collisions > 0 {
            lines.push(format!(
                "Warning: {} file(s) replaced by later files with the same name.",
                summary.archive.collisions
            ));
        }
        if summary.annotation.source_blocks > 0 {
            lines.push("Source code included as comments in the bundle.".to_string());
        }
        if let Some(author) = &summary.annotation.author {
            lines.push(format!("Author recorded: {}", author));
        }
        lines
    }

    fn create_entries_table(&self, summary: &BundleSummary) -> String {
        #[derive(Tabled)]
        struct EntryRow {
            #[tabled(rename = "Entry")]
            name: String,

            #[tabled(rename = "Source")]
            source: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let rows: Vec<EntryRow> = summary
            .archive
            .entries
            .iter()
            .map(|entry| EntryRow {
                name: entry.name.clone(),
                source: entry.source.display().to_string(),
                size: format_file_size(entry.size),
            })
            .collect();

        styled(Table::new(rows))
    }

    fn create_summary_table(&self, summary: &BundleSummary) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let row = |key: &str, value: String| SummaryRow {
            key: key.to_string(),
            value,
        };

        let mut rows = vec![
            row("📂 Output File", summary.output_file.display().to_string()),
            row("📄 Files Archived", summary.archive.entries.len().to_string()),
            row("📦 Bundle Size", format_file_size(summary.output_size)),
        ];
        if summary.annotation.bytes_appended > 0 {
            rows.push(row(
                "📝 Appended Text",
                format_file_size(summary.annotation.bytes_appended),
            ));
        }
        rows.push(row("⏱️ Process Time", format!("{:.4?}", summary.duration)));
        rows.push(row(
            "🕒 Finished",
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ));

        styled(Table::new(rows))
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    table.to_string()
}
