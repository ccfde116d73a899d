/*!
 * Output document writer
 *
 * The document is a flat sequence of blocks. Each block is a header line
 * `=== <label> ===`, the body, and a blank line.
 */

use std::io::{self, BufWriter, Write};

use crate::types::FileTree;

/// Label of the first block, whose body is the tree listing
pub const TREE_LABEL: &str = "FILE TREE";

/// Block writer over a single output handle
pub struct BlockWriter<W: Write> {
    inner: BufWriter<W>,
}

impl<W: Write> BlockWriter<W> {
    /// Wrap an output handle
    pub fn new(output: W) -> Self {
        Self {
            inner: BufWriter::new(output),
        }
    }

    /// Write the tree listing block
    pub fn write_tree(&mut self, tree: &FileTree) -> io::Result<()> {
        self.write_block(TREE_LABEL, &tree.render())
    }

    /// Write one labeled block
    pub fn write_block(&mut self, label: &str, body: &str) -> io::Result<()> {
        write!(self.inner, "=== {} ===\n{}\n\n", label, body)
    }

    /// Flush buffered blocks and hand back the underlying handle
    pub fn finish(self) -> io::Result<W> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}
