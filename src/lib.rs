/*!
 * RepoDump - Snapshot a repository into a single text document
 *
 * This library lists every path under a root directory and appends the
 * contents of tracked text files to one flat document, each under a
 * `=== <path> ===` header.
 */

pub mod aggregator;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


use std::fs::File;
use std::time::Instant;

// Re-export main components for easier access
pub use aggregator::{AggregateSummary, Aggregator, FileError};
pub use config::{Config, IndexBackend, FILE_PATTERNS};
pub use error::{DumpError, Result};
pub use git::{Git2Index, GitCommandIndex, TrackedFiles};
pub use report::{FileReportInfo, ReportFormat, Reporter, RunReport};
pub use scanner::Scanner;
pub use types::{FileTree, TreeEntry};
pub use writer::BlockWriter;

use error::ResultExt;

/// Build the index backend selected in the configuration
pub fn open_index(config: &Config) -> Box<dyn TrackedFiles> {
    match config.index_backend {
        IndexBackend::Libgit2 => Box::new(Git2Index::new(&config.target_dir)),
        IndexBackend::Command => Box::new(GitCommandIndex::new(&config.target_dir)),
    }
}

/// Run one full snapshot: tree block first, then one block per tracked file.
///
/// The output file is created before the walk and stays open until every
/// block has been written. Only output and root-traversal failures are
/// returned as errors; unreadable files are logged and skipped.
pub fn run(config: &Config, index: &dyn TrackedFiles) -> Result<RunReport> {
    let start_time = Instant::now();

    let file = File::create(&config.output_file)
        .with_context(|| format!("Failed to create {}", config.output_file.display()))?;
    let mut writer = BlockWriter::new(file);

    let tree = Scanner::new(config.clone()).scan()?;
    writer.write_tree(&tree)?;

    let aggregator = Aggregator::new(config, index);
    let summary = aggregator.aggregate(&mut writer)?;

    writer.finish()?;

    Ok(RunReport {
        output_file: config.output_file.display().to_string(),
        duration: start_time.elapsed(),
        tree_entries: tree.len(),
        blocks_written: summary.blocks_written,
        skipped_self: summary.skipped_self,
        failures: summary.failures,
        total_lines: summary.total_lines,
        total_chars: summary.total_chars,
        file_details: summary.file_details,
    })
}
