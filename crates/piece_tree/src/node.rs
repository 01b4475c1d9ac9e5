use std::ops::{Index, IndexMut};

use crate::PieceTree;
use crate::piece::Piece;

/// Handle of a node in the tree's arena. Slot 0 is the shared sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

pub const NIL: NodeId = NodeId(0);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeColor {
    Red,
    Black,
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub(crate) piece: Piece,
    pub(crate) color: NodeColor,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    // subtree totals: bytes and line breaks
    pub(crate) size: usize,
    pub(crate) lf: usize,
}

impl TreeNode {
    pub fn new(piece: Piece) -> Self {
        let (size, lf) = (piece.length, piece.line_feed_cnt);
        Self {
            piece,
            color: NodeColor::Red,
            parent: NIL,
            left: NIL,
            right: NIL,
            size,
            lf,
        }
    }

    pub(crate) fn sentinel() -> Self {
        Self {
            piece: Piece::default(),
            color: NodeColor::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
            size: 0,
            lf: 0,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == NodeColor::Red
    }
}

/// Node storage. Removed slots go on a free list and are reused.
#[derive(Debug, Clone)]
pub struct Nodes {
    nodes: Vec<TreeNode>,
    free: Vec<NodeId>,
}

impl Default for Nodes {
    fn default() -> Self {
        Self::new()
    }
}

impl Nodes {
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode::sentinel()],
            free: Vec::new(),
        }
    }

    pub(crate) fn from_vec(nodes: Vec<TreeNode>) -> Self {
        debug_assert!(!nodes.is_empty(), "arena must hold the sentinel");
        Self {
            nodes,
            free: Vec::new(),
        }
    }

    pub fn alloc(&mut self, node: TreeNode) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    pub fn release(&mut self, id: NodeId) {
        assert_ne!(id, NIL, "the sentinel is never released");
        self.nodes[id.0] = TreeNode::sentinel();
        self.free.push(id);
    }

    /// Number of live nodes, the sentinel excluded.
    pub fn live(&self) -> usize {
        self.nodes.len() - 1 - self.free.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.len()
    }
}

impl Index<NodeId> for Nodes {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Nodes {
    fn index_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }
}

impl PieceTree {
    pub(crate) fn left_of(&self, x: NodeId) -> NodeId {
        self.nodes[x].left
    }

    pub(crate) fn right_of(&self, x: NodeId) -> NodeId {
        self.nodes[x].right
    }

    pub(crate) fn parent_of(&self, x: NodeId) -> NodeId {
        self.nodes[x].parent
    }

    pub(crate) fn is_red(&self, x: NodeId) -> bool {
        self.nodes[x].is_red()
    }

    pub(crate) fn set_color(&mut self, x: NodeId, color: NodeColor) {
        self.nodes[x].color = color;
    }

    /// Recomputes subtree totals from `x` up to the root.
    pub(crate) fn bubble(&mut self, mut x: NodeId) {
        while x != NIL {
            let TreeNode {
                left, right, piece, ..
            } = &self.nodes[x];
            let (left, right) = (&self.nodes[*left], &self.nodes[*right]);
            let size = left.size + piece.length + right.size;
            let lf = left.lf + piece.line_feed_cnt + right.lf;

            let node = &mut self.nodes[x];
            node.size = size;
            node.lf = lf;
            x = node.parent;
        }
    }

    pub(crate) fn left_rotate(&mut self, x: NodeId) {
        let y = self.right_of(x);
        let y_left = self.left_of(y);

        self.nodes[x].right = y_left;
        if y_left != NIL {
            self.nodes[y_left].parent = x;
        }

        let x_parent = self.parent_of(x);
        self.nodes[y].parent = x_parent;

        if x_parent == NIL {
            self.root = y;
        } else if x == self.left_of(x_parent) {
            self.nodes[x_parent].left = y;
        } else {
            self.nodes[x_parent].right = y;
        }

        self.nodes[y].left = x;
        self.nodes[x].parent = y;

        // x is now below y, so walking up from x refreshes both
        self.bubble(x);
    }

    pub(crate) fn right_rotate(&mut self, y: NodeId) {
        let x = self.left_of(y);
        let x_right = self.right_of(x);

        self.nodes[y].left = x_right;
        if x_right != NIL {
            self.nodes[x_right].parent = y;
        }

        let y_parent = self.parent_of(y);
        self.nodes[x].parent = y_parent;

        if y_parent == NIL {
            self.root = x;
        } else if y == self.left_of(y_parent) {
            self.nodes[y_parent].left = x;
        } else {
            self.nodes[y_parent].right = x;
        }

        self.nodes[x].right = y;
        self.nodes[y].parent = x;

        self.bubble(y);
    }

    pub(crate) fn minimum(&self, mut x: NodeId) -> NodeId {
        while self.left_of(x) != NIL {
            x = self.left_of(x);
        }
        x
    }

    pub(crate) fn maximum(&self, mut x: NodeId) -> NodeId {
        while self.right_of(x) != NIL {
            x = self.right_of(x);
        }
        x
    }

    pub(crate) fn successor(&self, mut x: NodeId) -> NodeId {
        if self.right_of(x) != NIL {
            return self.minimum(self.right_of(x));
        }

        let mut y = self.parent_of(x);
        while y != NIL && x == self.right_of(y) {
            x = y;
            y = self.parent_of(y);
        }
        y
    }
}
