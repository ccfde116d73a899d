/*!
 * Tracked-file listing through libgit2
 */

use std::fs;
use std::path::{Path, PathBuf};

use git2::{PathspecFlags, Repository as Git2Repository};
use log::debug;

use super::error::{GitError, GitResult};
use super::TrackedFiles;
use crate::utils::to_slash_path;

/// Reads the repository index enclosing a root directory.
///
/// Matching follows `git ls-files <pattern>` run from the root: the pattern is
/// a pathspec relative to the root, `*` also matches `/`, and results are
/// relative to the root in index order.
pub struct Git2Index {
    root: PathBuf,
}

impl Git2Index {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the enclosing repository and compute the root's prefix inside it
    fn open(&self) -> GitResult<(Git2Repository, String)> {
        let repo = Git2Repository::discover(&self.root).map_err(GitError::Discover)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| GitError::BareRepository(repo.path().to_path_buf()))?;

        let root = fs::canonicalize(&self.root)?;
        let workdir = fs::canonicalize(workdir)?;
        let relative = root
            .strip_prefix(&workdir)
            .map_err(|_| GitError::OutsideWorkdir {
                root: root.clone(),
                workdir: workdir.clone(),
            })?;

        let prefix = pathspec_prefix(relative);
        debug!(
            "Using repository at {} with prefix '{}'",
            workdir.display(),
            prefix
        );

        Ok((repo, prefix))
    }
}

/// Directory prefix, with trailing `/`, of index paths below the root
fn pathspec_prefix(relative: &Path) -> String {
    let prefix = to_slash_path(relative);
    if prefix.is_empty() {
        prefix
    } else {
        format!("{}/", prefix)
    }
}

impl TrackedFiles for Git2Index {
    fn list_tracked(&self, pattern: &str) -> GitResult<Vec<String>> {
        let (repo, prefix) = self.open()?;
        let index = repo.index()?;

        // The prefix is matched literally; only the pattern is a pathspec
        let pathspec = git2::Pathspec::new([pattern])?;

        let mut files: Vec<String> = index
            .iter()
            .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
            .filter_map(|path| path.strip_prefix(prefix.as_str()).map(str::to_string))
            .filter(|rest| pathspec.matches_path(Path::new(rest), PathspecFlags::DEFAULT))
            .collect();

        // Conflicted paths appear once per stage
        files.dedup();

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn track(repo: &Git2Repository, root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(rel)).unwrap();
        index.write().unwrap();
    }

    #[test]
    fn test_pathspec_prefix() {
        assert_eq!(pathspec_prefix(Path::new("")), "");
        assert_eq!(pathspec_prefix(&PathBuf::from("a").join("b")), "a/b/");
    }

    #[test]
    fn test_lists_only_tracked_matches() {
        let temp_dir = tempdir().unwrap();
        let repo = Git2Repository::init(temp_dir.path()).unwrap();

        track(&repo, temp_dir.path(), "b.ts", "export {}\n");
        track(&repo, temp_dir.path(), "src/lib/a.ts", "export const a = 1;\n");
        track(&repo, temp_dir.path(), "README.md", "# hi\n");
        File::create(temp_dir.path().join("untracked.ts")).unwrap();

        let index = Git2Index::new(temp_dir.path());
        assert_eq!(
            index.list_tracked("*.ts").unwrap(),
            vec!["b.ts".to_string(), "src/lib/a.ts".to_string()]
        );
        assert_eq!(index.list_tracked("*.md").unwrap(), vec!["README.md"]);
        assert!(index.list_tracked("*.css").unwrap().is_empty());
    }

    #[test]
    fn test_subdirectory_root_is_relative() {
        let temp_dir = tempdir().unwrap();
        let repo = Git2Repository::init(temp_dir.path()).unwrap();

        track(&repo, temp_dir.path(), "top.json", "{}");
        track(&repo, temp_dir.path(), "pkg/inner.json", "{}");
        track(&repo, temp_dir.path(), "pkg/deep/more.json", "[]");

        let index = Git2Index::new(temp_dir.path().join("pkg"));
        assert_eq!(
            index.list_tracked("*.json").unwrap(),
            vec!["deep/more.json".to_string(), "inner.json".to_string()]
        );
    }

    #[test]
    fn test_root_with_glob_characters_is_literal() {
        let temp_dir = tempdir().unwrap();
        let repo = Git2Repository::init(temp_dir.path()).unwrap();

        track(&repo, temp_dir.path(), "pkg[1]/x.ts", "export {}\n");
        track(&repo, temp_dir.path(), "pkg1/y.ts", "export {}\n");
        track(&repo, temp_dir.path(), "a*b/z.ts", "export {}\n");
        track(&repo, temp_dir.path(), "aXb/w.ts", "export {}\n");

        let index = Git2Index::new(temp_dir.path().join("pkg[1]"));
        assert_eq!(index.list_tracked("*.ts").unwrap(), vec!["x.ts"]);

        let index = Git2Index::new(temp_dir.path().join("a*b"));
        assert_eq!(index.list_tracked("*.ts").unwrap(), vec!["z.ts"]);
    }

    #[test]
    fn test_not_a_repository() {
        let temp_dir = tempdir().unwrap();
        let index = Git2Index::new(temp_dir.path());
        // tempdirs normally live outside any repository
        if Git2Repository::discover(temp_dir.path()).is_err() {
            assert!(matches!(
                index.list_tracked("*.ts"),
                Err(GitError::Discover(_))
            ));
        }
    }
}
