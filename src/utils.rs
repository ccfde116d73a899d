/*!
 * Utility functions for RepoDump
 */

use std::env;
use std::path::{Component, Path};

/// Render a relative path with `/` separators regardless of platform
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// File name of the running executable, falling back to the package name
pub fn executable_name() -> String {
    env::current_exe()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Count lines the way an editor would: a trailing newline does not open a new line
pub fn count_lines(content: &str) -> usize {
    content.lines().count()
}
