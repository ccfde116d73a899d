/*!
 * Directory tree listing
 */

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Result;
use crate::types::{FileTree, TreeEntry};

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// List every directory and file below the target directory.
    ///
    /// Failing to read the root is fatal. A subdirectory that cannot be read
    /// is still listed itself, but its contents are skipped with a warning.
    pub fn scan(&self) -> Result<FileTree> {
        let mut tree = FileTree::new();
        self.scan_directory(&self.config.target_dir, Path::new(""), &mut tree)?;
        debug!(
            "Listed {} entries under {}",
            tree.len(),
            self.config.target_dir.display()
        );
        Ok(tree)
    }

    /// List the immediate children of a directory, then descend into each subdirectory
    fn scan_directory(
        &self,
        abs_path: &Path,
        rel_path: &Path,
        tree: &mut FileTree,
    ) -> walkdir::Result<()> {
        let entries: Vec<DirEntry> = WalkDir::new(abs_path)
            .max_depth(1)
            .min_depth(1)
            .into_iter()
            .collect::<walkdir::Result<_>>()?;

        // Directory symlinks count as directories, like `is_dir` on the path
        let (dirs, files): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|e| e.path().is_dir());

        for entry in &dirs {
            tree.push(TreeEntry::Directory(rel_path.join(entry.file_name())));
        }
        for entry in &files {
            tree.push(TreeEntry::File(rel_path.join(entry.file_name())));
        }

        for entry in dirs {
            if entry.path_is_symlink() {
                debug!("Not following symlink {}", entry.path().display());
                continue;
            }

            let new_rel_path: PathBuf = rel_path.join(entry.file_name());
            if let Err(e) = self.scan_directory(entry.path(), &new_rel_path, tree) {
                warn!(
                    "Error processing directory {}: {}",
                    entry.path().display(),
                    e
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn scan(root: &Path) -> FileTree {
        let config = Config::for_root(root, root.join("out.txt"));
        Scanner::new(config).scan().unwrap()
    }

    fn rendered(tree: &FileTree) -> HashSet<String> {
        tree.entries().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_root() {
        let temp_dir = tempdir().unwrap();
        let tree = scan(temp_dir.path());
        assert!(tree.is_empty());
        assert_eq!(tree.render(), "");
    }

    #[test]
    fn test_lists_all_entries() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src").join("nested")).unwrap();
        fs::create_dir(root.join("empty")).unwrap();
        File::create(root.join("a.json")).unwrap();
        File::create(root.join("src").join("b.ts")).unwrap();
        File::create(root.join("src").join("nested").join("c.md")).unwrap();

        let tree = scan(root);
        let expected: HashSet<String> = [
            "src/",
            "empty/",
            "a.json",
            "src/nested/",
            "src/b.ts",
            "src/nested/c.md",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(rendered(&tree), expected);
        assert_eq!(tree.len(), expected.len());
    }

    #[test]
    fn test_children_precede_grandchildren() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a").join("b")).unwrap();
        File::create(root.join("top.md")).unwrap();
        File::create(root.join("a").join("b").join("deep.md")).unwrap();

        let tree = scan(root);
        let position = |s: &str| {
            tree.entries()
                .iter()
                .position(|e| e.to_string() == s)
                .unwrap()
        };

        // All children of the root come before anything below them
        assert!(position("a/") < position("a/b/"));
        assert!(position("top.md") < position("a/b/"));
        assert!(position("a/b/") < position("a/b/deep.md"));
    }

    #[test]
    fn test_directories_listed_before_files_of_same_parent() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        File::create(root.join("file.txt")).unwrap();
        fs::create_dir(root.join("dir")).unwrap();

        let tree = scan(root);
        assert_eq!(tree.render(), "dir/\nfile.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlink_listed_not_followed() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("real")).unwrap();
        File::create(root.join("real").join("x.md")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let tree = scan(root);
        let entries = rendered(&tree);
        assert!(entries.contains("link/"));
        assert!(entries.contains("real/x.md"));
        assert!(!entries.contains("link/x.md"));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp_dir = tempdir().unwrap();
        let config = Config::for_root(temp_dir.path().join("missing"), "out.txt");
        assert!(Scanner::new(config).scan().is_err());
    }
}
