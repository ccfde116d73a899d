/*!
 * Tracked-file listing backed by git
 */

mod command;
mod error;
mod index;

// Re-export public items
pub use command::GitCommandIndex;
pub use error::{GitError, GitResult};
pub use index::Git2Index;

/// Source of the files known to version control.
///
/// Paths are returned relative to the scan root with `/` separators, in the
/// order the index stores them.
pub trait TrackedFiles {
    /// List tracked files matching a glob pattern such as `*.md`
    fn list_tracked(&self, pattern: &str) -> GitResult<Vec<String>>;
}

impl<T: TrackedFiles + ?Sized> TrackedFiles for &T {
    fn list_tracked(&self, pattern: &str) -> GitResult<Vec<String>> {
        (**self).list_tracked(pattern)
    }
}

impl<T: TrackedFiles + ?Sized> TrackedFiles for Box<T> {
    fn list_tracked(&self, pattern: &str) -> GitResult<Vec<String>> {
        (**self).list_tracked(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<String>);

    impl TrackedFiles for Fixed {
        fn list_tracked(&self, _pattern: &str) -> GitResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    fn count<I: TrackedFiles>(index: I) -> usize {
        index.list_tracked("*.md").map(|files| files.len()).unwrap_or(0)
    }

    #[test]
    fn test_boxed_and_borrowed_delegate() {
        let fixed = Fixed(vec!["a.md".to_string()]);
        assert_eq!(count(&fixed), 1);

        let boxed: Box<dyn TrackedFiles> = Box::new(fixed);
        assert_eq!(count(&boxed), 1);
        assert_eq!(count(boxed), 1);
    }

    #[test]
    fn test_error_display() {
        let err = GitError::CommandFailed("fatal: not a git repository".to_string());
        assert_eq!(
            err.to_string(),
            "git ls-files failed: fatal: not a git repository"
        );
    }
}
