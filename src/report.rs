/*!
 * Reporting functionality for RepoDump
 *
 * Summarizes a run on the console, either as tables rendered with the
 * tabled library or as JSON. The report is never part of the output
 * document.
 */

use std::time::Duration;

use clap::ValueEnum;
use serde::{Serialize, Serializer};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

/// Information about a written block
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReportInfo {
    /// Path relative to the scan root
    pub path: String,
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// A file that could not be read
#[derive(Debug, Clone, Serialize)]
pub struct FailureInfo {
    /// Path relative to the scan root
    pub path: String,
    /// Error message
    pub error: String,
}

/// Statistics for one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Output file path
    pub output_file: String,
    /// Time taken by the whole run
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
    /// Entries in the tree listing
    pub tree_entries: usize,
    /// Content blocks written
    pub blocks_written: usize,
    /// Matches skipped because they are the program itself
    pub skipped_self: usize,
    /// Files that could not be read
    pub failures: Vec<FailureInfo>,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// One record per written block
    pub file_details: Vec<FileReportInfo>,
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Console tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// No report
    None,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string, or `None` when reporting is disabled
    pub fn generate_report(&self, report: &RunReport) -> serde_json::Result<Option<String>> {
        match self.format {
            ReportFormat::Table => Ok(Some(self.generate_console_report(report))),
            ReportFormat::Json => serde_json::to_string_pretty(report).map(Some),
            ReportFormat::None => Ok(None),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) -> serde_json::Result<()> {
        if let Some(text) = self.generate_report(report)? {
            println!("\n{}", text);
        }
        Ok(())
    }

    // Shorten long paths from the left, keeping the file name visible
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut result = String::new();
        let mut current_len = 3;
        let mut segments = Vec::new();

        for part in path.split('/').rev() {
            let part_len = part.chars().count() + 1;
            if current_len + part_len <= max_len {
                segments.push(part);
                current_len += part_len;
            } else {
                break;
            }
        }

        result.push_str("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }

        result
    }

    fn styled(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "🌳 Tree Entries".to_string(),
                value: self.format_number(report.tree_entries),
            },
            SummaryRow {
                key: "📄 Files Written".to_string(),
                value: self.format_number(report.blocks_written),
            },
            SummaryRow {
                key: "⚠️ Failed Files".to_string(),
                value: self.format_number(report.failures.len()),
            },
            SummaryRow {
                key: "📝 Total Lines".to_string(),
                value: self.format_number(report.total_lines),
            },
            SummaryRow {
                key: "📦 LLM Tokens".to_string(),
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(report.total_chars / 4)
                ),
            },
        ];

        Self::styled(Table::new(rows))
    }

    fn create_files_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<&FileReportInfo> = report.file_details.iter().collect();
        files.sort_by(|a, b| b.chars.cmp(&a.chars));
        files.truncate(10);

        let rows: Vec<FileRow> = files
            .into_iter()
            .map(|info| FileRow {
                path: self.format_path(&info.path, 60),
                lines: self.format_number(info.lines),
                tokens: self.format_number(info.chars / 4),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    fn create_failures_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct FailureRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Error")]
            error: String,
        }

        let rows: Vec<FailureRow> = report
            .failures
            .iter()
            .map(|f| FailureRow {
                path: self.format_path(&f.path, 60),
                error: f.error.clone(),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    fn generate_console_report(&self, report: &RunReport) -> String {
        let mut sections = Vec::new();

        if !report.file_details.is_empty() {
            let title = if report.file_details.len() > 10 {
                "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
            } else {
                "📋  WRITTEN FILES"
            };
            sections.push(format!("{}\n{}", title, self.create_files_table(report)));
        }

        if !report.failures.is_empty() {
            sections.push(format!(
                "❌  FAILED FILES\n{}",
                self.create_failures_table(report)
            ));
        }

        sections.push(format!(
            "✅  SNAPSHOT COMPLETE\n{}",
            self.create_summary_table(report)
        ));

        sections.join("\n\n")
    }
}
