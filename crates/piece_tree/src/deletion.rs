use log::trace;

use crate::PieceTree;
use crate::node::{NIL, NodeColor, NodeId};

impl PieceTree {
    /// Removes `count` bytes starting at `offset`. The caller guarantees
    /// `offset + count <= self.len()` and `count > 0`.
    pub(crate) fn delete_text(&mut self, offset: usize, count: usize) {
        let Some((node, local)) = self.find(offset) else {
            return;
        };
        let end = local + count;
        let len = self.nodes[node].piece.length;

        if end == len {
            if local == 0 {
                self.delete_node(node);
            } else {
                self.trim_node_end(node, count);
                self.bubble(node);
            }
        } else if end < len {
            if local == 0 {
                self.trim_node_start(node, count);
                self.bubble(node);
            } else {
                self.split_node(node, local, count);
            }
        } else {
            self.delete_span(node, local, offset + count, count);
        }
    }

    // The range starts in `node` and runs past it.
    fn delete_span(&mut self, node: NodeId, local: usize, end: usize, count: usize) {
        let mut x = node;
        if local != 0 {
            x = self.split_node(node, local, 0);
        }

        if let Some((last, last_local)) = self.find(end) {
            if last_local != 0 {
                self.split_node(last, last_local, 0);
            }
        }

        let mut removed = 0;
        while x != NIL && removed < count {
            removed += self.nodes[x].piece.length;
            let next = self.successor(x);
            self.delete_node(x);
            x = next;
        }
        debug_assert_eq!(removed, count, "span delete must end on a piece boundary");
    }

    fn trim_node_start(&mut self, x: NodeId, n: usize) {
        let buffer_idx = self.nodes[x].piece.buffer_idx;
        self.nodes[x]
            .piece
            .trim_start(&self.buffers[buffer_idx], n);
    }

    fn trim_node_end(&mut self, x: NodeId, n: usize) {
        let buffer_idx = self.nodes[x].piece.buffer_idx;
        self.nodes[x].piece.trim_end(&self.buffers[buffer_idx], n);
    }

    /// Unlinks `z` and rebalances. `z`'s in-order successor keeps its handle.
    pub(crate) fn delete_node(&mut self, z: NodeId) {
        let mut y = z;
        let mut y_original_color = self.nodes[y].color;
        let x;

        if self.left_of(z) == NIL {
            x = self.right_of(z);
            self.transplant(z, x);
            self.bubble(self.parent_of(x));
        } else if self.right_of(z) == NIL {
            x = self.left_of(z);
            self.transplant(z, x);
            self.bubble(self.parent_of(x));
        } else {
            y = self.minimum(self.right_of(z));
            y_original_color = self.nodes[y].color;
            x = self.right_of(y);

            if y != self.right_of(z) {
                self.transplant(y, x);
                self.bubble(self.parent_of(x));

                let z_right = self.right_of(z);
                self.nodes[y].right = z_right;
                self.nodes[z_right].parent = y;
            } else {
                // x may be the sentinel; fixup walks up from its parent
                self.nodes[x].parent = y;
            }

            self.transplant(z, y);

            let z_left = self.left_of(z);
            self.nodes[y].left = z_left;
            self.nodes[z_left].parent = y;
            self.nodes[y].color = self.nodes[z].color;

            self.bubble(y);
        }

        if y_original_color == NodeColor::Black {
            self.delete_fixup(x);
        }

        trace!(
            "removed piece of buffer {}",
            self.nodes[z].piece.buffer_idx
        );
        self.nodes.release(z);
    }

    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let u_parent = self.parent_of(u);
        if u_parent == NIL {
            self.root = v;
        } else if u == self.left_of(u_parent) {
            self.nodes[u_parent].left = v;
        } else {
            self.nodes[u_parent].right = v;
        }
        self.nodes[v].parent = u_parent;
    }

    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root && !self.is_red(x) {
            let parent = self.parent_of(x);

            if x == self.left_of(parent) {
                let mut w = self.right_of(parent);

                if self.is_red(w) {
                    self.set_color(w, NodeColor::Black);
                    self.set_color(parent, NodeColor::Red);
                    self.left_rotate(parent);
                    w = self.right_of(self.parent_of(x));
                }

                if !self.is_red(self.left_of(w)) && !self.is_red(self.right_of(w)) {
                    self.set_color(w, NodeColor::Red);
                    x = self.parent_of(x);
                } else {
                    if !self.is_red(self.right_of(w)) {
                        let w_left = self.left_of(w);
                        self.set_color(w_left, NodeColor::Black);
                        self.set_color(w, NodeColor::Red);
                        self.right_rotate(w);
                        w = self.right_of(self.parent_of(x));
                    }

                    let parent = self.parent_of(x);
                    self.set_color(w, self.nodes[parent].color);
                    self.set_color(parent, NodeColor::Black);
                    let w_right = self.right_of(w);
                    self.set_color(w_right, NodeColor::Black);
                    self.left_rotate(parent);
                    x = self.root;
                }
            } else {
                let mut w = self.left_of(parent);

                if self.is_red(w) {
                    self.set_color(w, NodeColor::Black);
                    self.set_color(parent, NodeColor::Red);
                    self.right_rotate(parent);
                    w = self.left_of(self.parent_of(x));
                }

                if !self.is_red(self.right_of(w)) && !self.is_red(self.left_of(w)) {
                    self.set_color(w, NodeColor::Red);
                    x = self.parent_of(x);
                } else {
                    if !self.is_red(self.left_of(w)) {
                        let w_right = self.right_of(w);
                        self.set_color(w_right, NodeColor::Black);
                        self.set_color(w, NodeColor::Red);
                        self.left_rotate(w);
                        w = self.left_of(self.parent_of(x));
                    }

                    let parent = self.parent_of(x);
                    self.set_color(w, self.nodes[parent].color);
                    self.set_color(parent, NodeColor::Black);
                    let w_left = self.left_of(w);
                    self.set_color(w_left, NodeColor::Black);
                    self.right_rotate(parent);
                    x = self.root;
                }
            }
        }

        self.set_color(x, NodeColor::Black);
    }
}
