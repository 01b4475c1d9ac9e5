//! A piece table stored in a red-black tree.
//!
//! Text lives in append-only [`StringBuffer`]s. Every tree node owns a
//! [`Piece`] that views a range of one buffer, and caches the byte and line
//! break totals of its subtree, so lookups by offset and by line are both
//! `O(log n)`. All offsets are byte offsets into the UTF-8 document.

mod chunks;
mod deletion;
mod error;
mod insertion;
mod invariants;
mod node;
mod piece;
mod query;
mod snapshot;
mod splitting;
mod string_buffer;

use std::ops::Range;

use log::trace;

pub use crate::chunks::Chunks;
pub use crate::error::{DeleteError, InsertError, InvariantError};
pub use crate::piece::Piece;
pub use crate::snapshot::Snapshot;
pub use crate::string_buffer::{LineBreak, StringBuffer};

use crate::node::{NIL, NodeColor, NodeId, Nodes, TreeNode};

/// Buffers shorter than this take appended text in place.
pub const DEFAULT_GROWTH_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct PieceTree {
    pub(crate) root: NodeId,
    pub(crate) nodes: Nodes,
    pub(crate) buffers: Vec<StringBuffer>,
    pub(crate) growth_limit: usize,
}

impl Default for PieceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceTree {
    pub fn new() -> Self {
        Self::with_growth_limit(DEFAULT_GROWTH_LIMIT)
    }

    pub fn with_growth_limit(growth_limit: usize) -> Self {
        Self {
            root: NIL,
            nodes: Nodes::new(),
            buffers: Vec::new(),
            growth_limit,
        }
    }

    /// Builds a tree with one piece per non-empty chunk, in order.
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut tree = Self::new();
        tree.append_chunks(chunks);
        tree
    }

    /// Appends one piece per non-empty chunk after the current end.
    pub fn append_chunks<I>(&mut self, chunks: I)
    where
        I: IntoIterator<Item = String>,
    {
        for chunk in chunks {
            if chunk.is_empty() {
                continue;
            }

            let z = self.create_node_from(StringBuffer::new(chunk));
            if self.root == NIL {
                self.root = z;
                self.set_color(z, NodeColor::Black);
            } else {
                let last = self.maximum(self.root);
                self.insert_right(last, z);
            }
        }
    }

    pub fn growth_limit(&self) -> usize {
        self.growth_limit
    }

    pub fn len(&self) -> usize {
        self.nodes[self.root].size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of line breaks in the document.
    pub fn line_break_count(&self) -> usize {
        self.nodes[self.root].lf
    }

    /// 0 for an empty document, otherwise one more than the line breaks.
    pub fn line_count(&self) -> usize {
        match self.len() {
            0 => 0,
            _ => self.line_break_count() + 1,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.live()
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Inserts `text` so that it starts at byte `index`.
    pub fn insert(&mut self, index: usize, text: &str) -> Result<(), InsertError> {
        let len = self.len();
        if index > len {
            return Err(InsertError::OutOfBounds { index, len });
        }
        if !self.is_char_boundary(index) {
            return Err(InsertError::NotCharBoundary { index });
        }
        if text.is_empty() {
            return Ok(());
        }

        self.insert_text(index, text);
        Ok(())
    }

    /// Removes the bytes in `range`. A reversed range removes nothing.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), DeleteError> {
        let len = self.len();
        if range.end > len || range.start > len {
            return Err(DeleteError::OutOfBounds { range, len });
        }
        if range.start >= range.end {
            return Ok(());
        }
        for index in [range.start, range.end] {
            if !self.is_char_boundary(index) {
                return Err(DeleteError::NotCharBoundary { index });
            }
        }

        self.delete_text(range.start, range.end - range.start);
        Ok(())
    }

    /// Lazily yields up to `count` bytes starting at `start`, one fragment
    /// per piece. Empty when `start` is at or past the end.
    pub fn read(&self, start: usize, count: usize) -> Chunks<'_> {
        Chunks::new(self, start, count)
    }

    pub fn get_text(&self) -> String {
        let mut text = String::with_capacity(self.len());
        text.extend(self.read(0, self.len()));
        text
    }

    /// Pieces in document order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        let first = match self.root {
            NIL => NIL,
            root => self.minimum(root),
        };
        std::iter::successors(Some(first).filter(|x| *x != NIL), move |x| {
            Some(self.successor(*x)).filter(|next| *next != NIL)
        })
        .map(move |x| &self.nodes[x].piece)
    }

    pub(crate) fn create_node(&mut self, text: &str) -> NodeId {
        self.create_node_from(StringBuffer::new(text.to_string()))
    }

    fn create_node_from(&mut self, buffer: StringBuffer) -> NodeId {
        let buffer_idx = self.buffers.len();
        let piece = Piece::new(buffer_idx, &buffer, 0, buffer.len());
        trace!("allocated buffer {} of {} bytes", buffer_idx, buffer.len());
        self.buffers.push(buffer);
        self.nodes.alloc(TreeNode::new(piece))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty() {
        let tree = PieceTree::new();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.line_count(), 0);
        assert_eq!(tree.get_text(), "");
        assert_eq!(tree.pieces().count(), 0);
    }

    #[test]
    fn lines_basic_unix() {
        let tree = PieceTree::from_chunks(["Hello\nWorld".to_string()]);
        assert_eq!(tree.len(), 11);
        assert_eq!(tree.line_count(), 2);
        assert_eq!(tree.line_start(1), Some(6));
    }

    #[test]
    fn lines_crlf_single_buffer() {
        let tree = PieceTree::from_chunks(["abc\r\ndef\r\nxyz".to_string()]);
        assert_eq!(tree.line_count(), 3);
        assert_eq!(tree.line_start(1), Some(5));
        assert_eq!(tree.line_start(2), Some(10));
    }

    #[test]
    fn lines_multiple_chunks() {
        let tree = PieceTree::from_chunks(["foo\n".to_string(), "bar\nbaz".to_string()]);
        assert_eq!(tree.get_text(), "foo\nbar\nbaz");
        assert_eq!(tree.line_count(), 3);
        assert_eq!(tree.pieces().count(), 2);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn lines_trailing_newline() {
        let tree = PieceTree::from_chunks(["a\nb\n".to_string()]);
        assert_eq!(tree.line_count(), 3);
        assert_eq!(tree.line_start(2), Some(4));
        assert_eq!(tree.line_start(3), None);
    }

    #[test]
    fn insert_out_of_bounds() {
        let mut tree = PieceTree::from_chunks(["Lorem".to_string()]);
        assert_eq!(
            tree.insert(6, "!"),
            Err(InsertError::OutOfBounds { index: 6, len: 5 })
        );
        assert_eq!(tree.get_text(), "Lorem");
    }

    #[test]
    fn insert_inside_char_is_rejected() {
        let mut tree = PieceTree::from_chunks(["é".to_string()]);
        assert_eq!(
            tree.insert(1, "x"),
            Err(InsertError::NotCharBoundary { index: 1 })
        );
        tree.insert(2, "x").unwrap();
        assert_eq!(tree.get_text(), "éx");
    }

    #[test]
    fn delete_errors_and_noops() {
        let mut tree = PieceTree::from_chunks(["Lorem ipsum".to_string()]);

        assert_eq!(
            tree.delete(5..12),
            Err(DeleteError::OutOfBounds { range: 5..12, len: 11 })
        );
        #[allow(clippy::reversed_empty_ranges)]
        tree.delete(6..5).unwrap();
        tree.delete(5..5).unwrap();
        assert_eq!(tree.get_text(), "Lorem ipsum");
        assert_eq!(tree.node_count(), 1);

        tree.delete(5..11).unwrap();
        assert_eq!(tree.get_text(), "Lorem");
    }

    #[test]
    fn empty_insert_adds_no_piece() {
        let mut tree = PieceTree::new();
        tree.insert(0, "").unwrap();
        assert_eq!(tree.node_count(), 0);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn growth_stops_at_limit() {
        let mut tree = PieceTree::new();
        for _ in 0..DEFAULT_GROWTH_LIMIT {
            let end = tree.len();
            tree.insert(end, "a").unwrap();
            assert_eq!(tree.node_count(), 1);
        }

        let end = tree.len();
        tree.insert(end, "a").unwrap();
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.len(), DEFAULT_GROWTH_LIMIT + 1);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn custom_growth_limit() {
        let mut tree = PieceTree::with_growth_limit(0);
        tree.insert(0, "a").unwrap();
        tree.insert(1, "b").unwrap();
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.growth_limit(), 0);
    }
}
