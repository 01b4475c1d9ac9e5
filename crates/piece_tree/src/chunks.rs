use std::iter::FusedIterator;

use crate::PieceTree;
use crate::node::{NIL, NodeId};

/// Fragments of a range of the document, one per piece, in order.
///
/// Borrows the tree, so it cannot outlive or interleave with an edit.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    tree: &'a PieceTree,
    node: NodeId,
    offset: usize,
    remaining: usize,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(tree: &'a PieceTree, start: usize, count: usize) -> Self {
        match tree.find(start) {
            Some((node, offset)) => Self {
                tree,
                node,
                offset,
                remaining: count,
            },
            None => Self {
                tree,
                node: NIL,
                offset: 0,
                remaining: 0,
            },
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.node == NIL || self.remaining == 0 {
            return None;
        }

        let tree = self.tree;
        let piece = &tree.nodes[self.node].piece;
        let count = (piece.length - self.offset).min(self.remaining);
        let text = tree.buffers[piece.buffer_idx].read(piece.start + self.offset, count);

        self.node = tree.successor(self.node);
        self.offset = 0;
        self.remaining -= count;
        Some(text)
    }
}

impl FusedIterator for Chunks<'_> {}
