/*!
 * Error types for tracked-file listing
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while listing tracked files
#[derive(Error, Debug)]
pub enum GitError {
    /// No repository encloses the root
    #[error("Not a git repository: {0}")]
    Discover(git2::Error),

    /// The repository has no working directory
    #[error("Repository has no working directory: {}", .0.display())]
    BareRepository(PathBuf),

    /// The root does not lie inside the repository's working directory
    #[error("{} is outside the working directory {}", .root.display(), .workdir.display())]
    OutsideWorkdir { root: PathBuf, workdir: PathBuf },

    /// `git ls-files` exited unsuccessfully
    #[error("git ls-files failed: {0}")]
    CommandFailed(String),

    /// Git2 error (generic)
    #[error("Git error: {0}")]
    Git2Error(#[from] git2::Error),

    /// IO error while listing, including a missing `git` executable
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Specialized Result type for index operations
pub type GitResult<T> = Result<T, GitError>;
