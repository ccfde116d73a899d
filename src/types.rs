/*!
 * Core types and data structures for the RepoDump application
 */

use std::fmt;
use std::path::PathBuf;

use crate::utils::to_slash_path;

/// One line of the file tree listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    /// Directory, rendered with a trailing `/`
    Directory(PathBuf),
    /// Anything that is not a directory
    File(PathBuf),
}

impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(path) => write!(f, "{}/", to_slash_path(path)),
            Self::File(path) => write!(f, "{}", to_slash_path(path)),
        }
    }
}

/// Ordered listing of everything below a scan root.
///
/// Entries keep traversal order: the children of a directory are listed
/// before anything deeper than them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    entries: Vec<TreeEntry>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TreeEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newline-joined listing, without a trailing newline
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromIterator<TreeEntry> for FileTree {
    fn from_iter<I: IntoIterator<Item = TreeEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
