/*!
 * Tracked-file listing through the `git` executable
 */

use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::debug;

use super::error::{GitError, GitResult};
use super::TrackedFiles;

/// Runs `git ls-files -z -- <pattern>` inside the root directory
pub struct GitCommandIndex {
    root: PathBuf,
    program: String,
}

impl GitCommandIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            program: "git".to_string(),
        }
    }

    /// Use a different executable in place of `git`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

/// Split NUL-terminated `ls-files -z` output
fn parse_ls_files(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|&b| b == 0)
        .filter(|entry| !entry.is_empty())
        .map(|entry| String::from_utf8_lossy(entry).into_owned())
        .collect()
}

impl TrackedFiles for GitCommandIndex {
    fn list_tracked(&self, pattern: &str) -> GitResult<Vec<String>> {
        debug!("Running {} ls-files {} in {}", self.program, pattern, self.root.display());

        let output = Command::new(&self.program)
            .args(["ls-files", "-z", "--", pattern])
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(GitError::CommandFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(parse_ls_files(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_ls_files() {
        let out = b"a.ts\0src/with space.ts\0";
        assert_eq!(
            parse_ls_files(out),
            vec!["a.ts".to_string(), "src/with space.ts".to_string()]
        );
        assert!(parse_ls_files(b"").is_empty());
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let temp_dir = tempdir().unwrap();
        let index = GitCommandIndex::new(temp_dir.path()).with_program("repodump-no-such-git");
        assert!(matches!(
            index.list_tracked("*.ts"),
            Err(GitError::IoError(_))
        ));
    }
}
