use log::trace;

use crate::PieceTree;
use crate::node::{NodeId, TreeNode};

impl PieceTree {
    /// Cuts `x` at local `index`, dropping the `gap` bytes after the cut, and
    /// links the remainder in as the successor of `x`. Returns the new node.
    pub(crate) fn split_node(&mut self, x: NodeId, index: usize, gap: usize) -> NodeId {
        let buffer_idx = self.nodes[x].piece.buffer_idx;
        let rest = self.nodes[x]
            .piece
            .split_off(&self.buffers[buffer_idx], index, gap);
        trace!(
            "split piece of buffer {} at {} (gap {})",
            rest.buffer_idx, index, gap
        );
        self.bubble(x);

        let node = self.nodes.alloc(TreeNode::new(rest));
        self.insert_after(x, node);
        node
    }
}
