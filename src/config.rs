/*!
 * Configuration handling for RepoDump
 */

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::error::Result;
use crate::report::ReportFormat;
use crate::utils::executable_name;
use crate::{bail, ensure};

/// Tracked-file patterns, processed in this order
pub const FILE_PATTERNS: [&str; 8] = [
    "*.ts", "*.tsx", "*.js", "*.json", "*.yml", "*.toml", "*.md", "*.css",
];

/// Default name of the output document
pub const DEFAULT_OUTPUT_FILE: &str = "repo_contents.txt";

/// How tracked files are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IndexBackend {
    /// Read the repository index through libgit2 (default)
    #[default]
    Libgit2,
    /// Run `git ls-files` as a subprocess
    Command,
}

/// Command-line arguments for RepoDump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "repodump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Snapshot a repository's file tree and tracked text files into one document",
    long_about = "Lists every path under a directory, then appends the content of each tracked .ts, .tsx, .js, .json, .yml, .toml, .md and .css file under a `=== <path> ===` header."
)]
pub struct Args {
    /// Directory to snapshot
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output file name
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// How tracked files are listed
    #[clap(long = "index", value_enum, default_value_t = IndexBackend::default())]
    pub index_backend: IndexBackend,

    /// File name that is never included as a content block (defaults to this executable's name)
    #[clap(long)]
    pub self_name: Option<String>,

    /// Format of the summary printed after the run
    #[clap(long, value_enum, default_value_t = ReportFormat::default())]
    pub report: ReportFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root of the tree listing and of tracked-file paths
    pub target_dir: PathBuf,

    /// Output document path
    pub output_file: PathBuf,

    /// Tracked-file patterns, in processing order
    pub patterns: Vec<String>,

    /// Path that is skipped by the aggregator
    pub self_name: String,

    /// How tracked files are listed
    pub index_backend: IndexBackend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("."),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            patterns: FILE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            self_name: executable_name(),
            index_backend: IndexBackend::default(),
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.directory_path),
            output_file: PathBuf::from(args.output_file),
            self_name: args.self_name.unwrap_or_else(executable_name),
            index_backend: args.index_backend,
            ..Self::default()
        }
    }

    /// Configuration rooted at `target_dir` writing to `output_file`
    pub fn for_root(target_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            output_file: output_file.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        if let Some(parent) = self.output_file.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                bail!(Config, "Output directory not found: {}", parent.display());
            }
        }

        ensure!(
            !self.output_file.is_dir(),
            Config,
            "Output path is a directory: {}",
            self.output_file.display()
        );

        Ok(())
    }
}
