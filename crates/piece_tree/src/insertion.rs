use log::trace;

use crate::PieceTree;
use crate::node::{NIL, NodeColor, NodeId};

/// Where an insertion offset landed relative to the node that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertionCase {
    /// The tree is empty.
    Root,
    /// Right before the node's piece.
    Left,
    /// Right after the node's piece.
    Right,
    /// Strictly inside the node's piece, at the given local offset.
    Split(usize),
}

impl PieceTree {
    /// Descends to the node an insertion at `offset` attaches to.
    pub(crate) fn insertion_point(&self, mut offset: usize) -> (NodeId, InsertionCase) {
        let mut p = NIL;
        let mut case = InsertionCase::Root;
        let mut x = self.root;

        while x != NIL {
            let left = self.left_of(x);
            if offset <= self.nodes[left].size {
                case = InsertionCase::Left;
                p = x;
                x = left;
                continue;
            }

            offset -= self.nodes[left].size;
            let len = self.nodes[x].piece.length;
            if offset < len {
                return (x, InsertionCase::Split(offset));
            }

            offset -= len;
            case = InsertionCase::Right;
            p = x;
            x = self.right_of(x);
        }

        (p, case)
    }

    pub(crate) fn insert_text(&mut self, offset: usize, text: &str) {
        let (p, case) = self.insertion_point(offset);

        if case == InsertionCase::Right && self.node_growable(p) {
            self.grow_node(p, text);
            self.bubble(p);
            return;
        }

        let z = self.create_node(text);
        match case {
            InsertionCase::Root => {
                self.root = z;
                self.set_color(z, NodeColor::Black);
            }
            InsertionCase::Left => self.insert_left(p, z),
            InsertionCase::Right => self.insert_right(p, z),
            InsertionCase::Split(index) => {
                let y = self.split_node(p, index, 0);
                self.insert_before(y, z);
            }
        }
    }

    fn node_growable(&self, x: NodeId) -> bool {
        let piece = &self.nodes[x].piece;
        piece.is_growable(&self.buffers[piece.buffer_idx], self.growth_limit)
    }

    fn grow_node(&mut self, x: NodeId, text: &str) {
        let piece = &mut self.nodes[x].piece;
        let buffer = &mut self.buffers[piece.buffer_idx];
        buffer.append(text);
        let length = piece.length + text.len();
        piece.resize(buffer, length);
        trace!(
            "grew buffer {} in place to {} bytes",
            piece.buffer_idx,
            buffer.len()
        );
    }

    pub(crate) fn insert_before(&mut self, p: NodeId, z: NodeId) {
        let left = self.left_of(p);
        if left == NIL {
            self.insert_left(p, z);
        } else {
            let q = self.maximum(left);
            self.insert_right(q, z);
        }
    }

    pub(crate) fn insert_after(&mut self, p: NodeId, z: NodeId) {
        let right = self.right_of(p);
        if right == NIL {
            self.insert_right(p, z);
        } else {
            let q = self.minimum(right);
            self.insert_left(q, z);
        }
    }

    fn insert_left(&mut self, p: NodeId, z: NodeId) {
        debug_assert_eq!(self.left_of(p), NIL);
        self.nodes[p].left = z;
        self.nodes[z].parent = p;

        self.bubble(z);
        self.insert_fixup(z);
    }

    pub(crate) fn insert_right(&mut self, p: NodeId, z: NodeId) {
        debug_assert_eq!(self.right_of(p), NIL);
        self.nodes[p].right = z;
        self.nodes[z].parent = p;

        self.bubble(z);
        self.insert_fixup(z);
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.is_red(self.parent_of(z)) {
            let parent = self.parent_of(z);
            let grand = self.parent_of(parent);

            if parent == self.left_of(grand) {
                let uncle = self.right_of(grand);
                if self.is_red(uncle) {
                    self.set_color(parent, NodeColor::Black);
                    self.set_color(uncle, NodeColor::Black);
                    self.set_color(grand, NodeColor::Red);
                    z = grand;
                } else {
                    if z == self.right_of(parent) {
                        z = parent;
                        self.left_rotate(z);
                    }
                    let parent = self.parent_of(z);
                    let grand = self.parent_of(parent);
                    self.set_color(parent, NodeColor::Black);
                    self.set_color(grand, NodeColor::Red);
                    self.right_rotate(grand);
                }
            } else {
                // mirror
                let uncle = self.left_of(grand);
                if self.is_red(uncle) {
                    self.set_color(parent, NodeColor::Black);
                    self.set_color(uncle, NodeColor::Black);
                    self.set_color(grand, NodeColor::Red);
                    z = grand;
                } else {
                    if z == self.left_of(parent) {
                        z = parent;
                        self.right_rotate(z);
                    }
                    let parent = self.parent_of(z);
                    let grand = self.parent_of(parent);
                    self.set_color(parent, NodeColor::Black);
                    self.set_color(grand, NodeColor::Red);
                    self.left_rotate(grand);
                }
            }
        }

        let root = self.root;
        self.set_color(root, NodeColor::Black);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree_of(text: &str) -> PieceTree {
        PieceTree::from_chunks([text.to_string()])
    }

    #[test]
    fn insertion_point_cases() {
        let tree = tree_of("Lorem");
        let root = tree.root;

        assert_eq!(PieceTree::new().insertion_point(0), (NIL, InsertionCase::Root));
        assert_eq!(tree.insertion_point(0), (root, InsertionCase::Left));
        assert_eq!(tree.insertion_point(2), (root, InsertionCase::Split(2)));
        assert_eq!(tree.insertion_point(5), (root, InsertionCase::Right));
    }

    #[test]
    fn sequential_typing_grows_one_node() {
        let mut tree = PieceTree::new();
        for c in "Lorem ipsum".chars() {
            let end = tree.len();
            tree.insert(end, c.encode_utf8(&mut [0; 4])).unwrap();
        }

        assert_eq!(tree.get_text(), "Lorem ipsum");
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.buffer_count(), 1);
    }

    #[test]
    fn split_insert_makes_three_pieces() {
        let mut tree = tree_of("Loremipsum");
        tree.insert(5, " ").unwrap();

        assert_eq!(tree.get_text(), "Lorem ipsum");
        assert_eq!(tree.node_count(), 3);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn prepend_is_left_case() {
        let mut tree = tree_of("ipsum");
        tree.insert(0, "Lorem ").unwrap();

        assert_eq!(tree.get_text(), "Lorem ipsum");
        assert_eq!(tree.node_count(), 2);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn many_prepends_stay_balanced() {
        let mut tree = PieceTree::new();
        let mut expected = String::new();
        for i in 0..200 {
            let word = format!("{i}\n");
            tree.insert(0, &word).unwrap();
            expected.insert_str(0, &word);
            tree.check_invariants().unwrap();
        }

        assert_eq!(tree.get_text(), expected);
        assert_eq!(tree.line_count(), 201);
    }
}
