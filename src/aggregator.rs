/*!
 * Content aggregation for tracked files
 *
 * For each configured pattern, the tracked files it matches are read and
 * appended to the output as one block per file. A file that cannot be read
 * is logged and skipped; it never aborts the run.
 */

use std::fs;
use std::io::{self, Write};

use log::{debug, error, info, warn};
use thiserror::Error;

use crate::config::Config;
use crate::git::TrackedFiles;
use crate::report::{FailureInfo, FileReportInfo};
use crate::utils::count_lines;
use crate::writer::BlockWriter;

/// Failure to read one tracked file
#[derive(Error, Debug)]
#[error("{path}: {source}")]
pub struct FileError {
    /// Path relative to the scan root
    pub path: String,
    /// Underlying open or read error, including invalid UTF-8
    #[source]
    pub source: io::Error,
}

/// What the aggregator did during one run
#[derive(Debug, Clone, Default)]
pub struct AggregateSummary {
    /// Content blocks written
    pub blocks_written: usize,
    /// Matches skipped because they are the program itself
    pub skipped_self: usize,
    /// Files that could not be read
    pub failures: Vec<FailureInfo>,
    /// Total number of lines written
    pub total_lines: usize,
    /// Total number of characters written
    pub total_chars: usize,
    /// One record per written block, in output order
    pub file_details: Vec<FileReportInfo>,
}

impl AggregateSummary {
    fn record_block(&mut self, path: &str, content: &str) {
        let lines = count_lines(content);
        let chars = content.chars().count();

        self.blocks_written += 1;
        self.total_lines += lines;
        self.total_chars += chars;
        self.file_details.push(FileReportInfo {
            path: path.to_string(),
            lines,
            chars,
        });
    }
}

/// Appends tracked files to the output document
pub struct Aggregator<'a> {
    config: &'a Config,
    index: &'a dyn TrackedFiles,
}

impl<'a> Aggregator<'a> {
    /// Create a new aggregator
    pub fn new(config: &'a Config, index: &'a dyn TrackedFiles) -> Self {
        Self { config, index }
    }

    /// Write one block per matched file, pattern by pattern.
    ///
    /// Only failures to write the output are returned; listing and read
    /// failures are logged and counted.
    pub fn aggregate<W: Write>(&self, writer: &mut BlockWriter<W>) -> io::Result<AggregateSummary> {
        let mut summary = AggregateSummary::default();
        let mut listing_warned = false;

        for pattern in &self.config.patterns {
            let files = match self.index.list_tracked(pattern) {
                Ok(files) => files,
                Err(e) => {
                    if listing_warned {
                        debug!("No tracked files for {}: {}", pattern, e);
                    } else {
                        warn!("Could not list tracked files ({}), skipping content", e);
                        listing_warned = true;
                    }
                    continue;
                }
            };
            debug!("{} tracked files match {}", files.len(), pattern);

            for file in files {
                if file == self.config.self_name {
                    debug!("Skipping {}", file);
                    summary.skipped_self += 1;
                    continue;
                }

                info!("Processing: {}", file);
                match self.read_entry(&file) {
                    Ok(content) => {
                        writer.write_block(&file, &content)?;
                        summary.record_block(&file, &content);
                    }
                    Err(e) => {
                        error!("Error processing {}: {}", e.path, e.source);
                        summary.failures.push(FailureInfo {
                            path: e.path,
                            error: e.source.to_string(),
                        });
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Read a tracked file, relative to the scan root, as UTF-8 text
    pub fn read_entry(&self, path: &str) -> Result<String, FileError> {
        fs::read_to_string(self.config.target_dir.join(path)).map_err(|source| FileError {
            path: path.to_string(),
            source,
        })
    }
}
