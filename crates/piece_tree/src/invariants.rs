use crate::PieceTree;
use crate::error::InvariantError;
use crate::node::{NIL, NodeId};

impl PieceTree {
    /// Walks the whole tree and verifies the red-black rules, the cached
    /// subtree totals and every piece's line break range.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.is_red(self.root) {
            return Err(InvariantError::RedRoot);
        }
        if self.is_red(NIL) {
            return Err(InvariantError::RedSentinel);
        }
        if self.root != NIL && self.parent_of(self.root) != NIL {
            return Err(InvariantError::ParentLink {
                node: self.root.index(),
            });
        }

        self.check_subtree(self.root).map(|_| ())
    }

    // Returns (black height, bytes, line breaks) of the subtree at `x`.
    fn check_subtree(&self, x: NodeId) -> Result<(usize, usize, usize), InvariantError> {
        if x == NIL {
            return Ok((1, 0, 0));
        }

        let node = &self.nodes[x];
        let id = x.index();

        if node.piece.is_empty() {
            return Err(InvariantError::EmptyPiece { node: id });
        }
        for child in [node.left, node.right] {
            if child != NIL && self.parent_of(child) != x {
                return Err(InvariantError::ParentLink {
                    node: child.index(),
                });
            }
            if node.is_red() && self.is_red(child) {
                return Err(InvariantError::RedRed { node: id });
            }
        }

        let buffer = &self.buffers[node.piece.buffer_idx];
        let actual = buffer.line_range(0, node.piece.start, node.piece.end());
        let recorded = node.piece.line_start..node.piece.line_start + node.piece.line_feed_cnt;
        if actual != recorded {
            return Err(InvariantError::LineRange {
                node: id,
                recorded,
                actual,
            });
        }

        let (left_height, left_size, left_lf) = self.check_subtree(node.left)?;
        let (right_height, right_size, right_lf) = self.check_subtree(node.right)?;

        if left_height != right_height {
            return Err(InvariantError::BlackHeight {
                node: id,
                left: left_height,
                right: right_height,
            });
        }

        let size = left_size + node.piece.length + right_size;
        if size != node.size {
            return Err(InvariantError::Aggregate {
                node: id,
                what: "bytes",
                cached: node.size,
                actual: size,
            });
        }

        let lf = left_lf + node.piece.line_feed_cnt + right_lf;
        if lf != node.lf {
            return Err(InvariantError::Aggregate {
                node: id,
                what: "line breaks",
                cached: node.lf,
                actual: lf,
            });
        }

        let height = left_height + usize::from(!node.is_red());
        Ok((height, size, lf))
    }
}
