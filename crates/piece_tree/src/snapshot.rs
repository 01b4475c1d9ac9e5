use crate::PieceTree;
use crate::node::{NIL, NodeId, Nodes, TreeNode};

/// Saved tree shape. Holds piece handles into the tree's buffers but never
/// the buffer contents, so it can only be restored into the tree that made it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    nodes: Vec<TreeNode>,
    root: NodeId,
    buffer_count: usize,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.nodes[self.root.index()].size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PieceTree {
    /// Copies the nodes reachable from the root into a compact arena.
    pub fn save(&self) -> Snapshot {
        let mut nodes = vec![TreeNode::sentinel()];
        let mut remap = vec![NIL; self.nodes.capacity()];
        let mut order = Vec::with_capacity(self.node_count());

        let mut stack = vec![self.root];
        while let Some(x) = stack.pop() {
            if x == NIL {
                continue;
            }
            remap[x.index()] = self.copy_slot(&mut nodes, x);
            order.push(x);
            stack.push(self.right_of(x));
            stack.push(self.left_of(x));
        }

        for x in order {
            let node = &mut nodes[remap[x.index()].index()];
            node.parent = remap[node.parent.index()];
            node.left = remap[node.left.index()];
            node.right = remap[node.right.index()];
        }

        Snapshot {
            nodes,
            root: remap[self.root.index()],
            buffer_count: self.buffers.len(),
        }
    }

    fn copy_slot(&self, nodes: &mut Vec<TreeNode>, x: NodeId) -> NodeId {
        nodes.push(self.nodes[x].clone());
        NodeId::from_index(nodes.len() - 1)
    }

    /// Replaces the tree shape with `snapshot`. Buffers are kept as they are;
    /// growth since the save only appended past every saved piece.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        assert!(
            snapshot.buffer_count <= self.buffers.len(),
            "snapshot references {} buffers, tree has {}",
            snapshot.buffer_count,
            self.buffers.len()
        );
        self.nodes = Nodes::from_vec(snapshot.nodes.clone());
        self.root = snapshot.root;
    }
}
