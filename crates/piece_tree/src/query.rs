use crate::PieceTree;
use crate::node::{NIL, NodeId};

impl PieceTree {
    /// Node holding byte `index` and the offset of that byte inside its piece.
    pub(crate) fn find(&self, mut index: usize) -> Option<(NodeId, usize)> {
        let mut x = self.root;

        while x != NIL {
            let left = self.left_of(x);
            if index < self.nodes[left].size {
                x = left;
                continue;
            }

            index -= self.nodes[left].size;
            let len = self.nodes[x].piece.length;
            if index < len {
                return Some((x, index));
            }

            index -= len;
            x = self.right_of(x);
        }

        None
    }

    /// Document offset just past the line break with the given index, that
    /// is, the start of line `index + 1`.
    pub fn offset_after_line_break(&self, mut index: usize) -> Option<usize> {
        let mut x = self.root;
        let mut offset = 0;

        while x != NIL {
            let left = self.left_of(x);
            if index < self.nodes[left].lf {
                x = left;
                continue;
            }

            index -= self.nodes[left].lf;
            offset += self.nodes[left].size;

            let piece = &self.nodes[x].piece;
            if index < piece.line_feed_cnt {
                let buffer = &self.buffers[piece.buffer_idx];
                let end = buffer.line_break_end(piece.line_start + index);
                return Some(offset + end - piece.start);
            }

            index -= piece.line_feed_cnt;
            offset += piece.length;
            x = self.right_of(x);
        }

        None
    }

    /// Offset at which `line` starts. Line 0 always starts at 0.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        match line {
            0 => Some(0),
            _ => self.offset_after_line_break(line - 1),
        }
    }

    /// Zero-based `(line, column)` of `offset`, or `None` past the end.
    pub fn position_at(&self, offset: usize) -> Option<(usize, usize)> {
        if offset > self.len() {
            return None;
        }

        let mut x = self.root;
        let mut index = offset;
        let mut line = 0;

        while x != NIL {
            let left = self.left_of(x);
            if index < self.nodes[left].size {
                x = left;
                continue;
            }

            index -= self.nodes[left].size;
            line += self.nodes[left].lf;

            let piece = &self.nodes[x].piece;
            if index < piece.length {
                let buffer = &self.buffers[piece.buffer_idx];
                let before = buffer.find_line_break(piece.line_start, piece.start + index);
                line += before - piece.line_start;
                break;
            }

            index -= piece.length;
            line += piece.line_feed_cnt;
            x = self.right_of(x);
        }

        let line_start = self.line_start(line)?;
        Some((line, offset - line_start))
    }

    pub fn is_char_boundary(&self, offset: usize) -> bool {
        match self.find(offset) {
            Some((x, local)) => {
                let piece = &self.nodes[x].piece;
                self.buffers[piece.buffer_idx].is_char_boundary(piece.start + local)
            }
            None => offset == self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::PieceTree;

    fn lorem() -> PieceTree {
        let mut tree = PieceTree::new();
        tree.insert(0, "Lorem\naliqua.").unwrap();
        tree.insert(6, "ipsum\nmagna\n").unwrap();
        tree.insert(12, "dolor\ndolore\n").unwrap();
        tree.insert(18, "sit\net\n").unwrap();
        tree
    }

    #[test]
    fn find_by_offset() {
        let tree = PieceTree::from_chunks(["ab".to_string(), "cde".to_string()]);

        let (first, local) = tree.find(1).unwrap();
        assert_eq!(local, 1);
        assert_eq!(tree.nodes[first].piece.len(), 2);

        let (second, local) = tree.find(2).unwrap();
        assert_eq!(local, 0);
        assert_eq!(tree.nodes[second].piece.len(), 3);

        assert!(tree.find(5).is_none());
    }

    #[test]
    fn line_starts_across_pieces() {
        let tree = lorem();
        assert_eq!(
            tree.get_text(),
            "Lorem\nipsum\ndolor\nsit\net\ndolore\nmagna\naliqua."
        );

        assert_eq!(tree.line_start(0), Some(0));
        assert_eq!(tree.line_start(1), Some(6));
        assert_eq!(tree.line_start(2), Some(12));
        assert_eq!(tree.line_start(3), Some(18));
        assert_eq!(tree.line_start(7), Some(38));
        assert_eq!(tree.line_start(8), None);
    }

    #[test]
    fn crlf_line_starts() {
        let tree = PieceTree::from_chunks(["a\r\nb\nc".to_string()]);
        assert_eq!(tree.offset_after_line_break(0), Some(3));
        assert_eq!(tree.offset_after_line_break(1), Some(5));
        assert_eq!(tree.offset_after_line_break(2), None);
    }

    #[test]
    fn position_of_offset() {
        let tree = lorem();

        assert_eq!(tree.position_at(0), Some((0, 0)));
        assert_eq!(tree.position_at(5), Some((0, 5)));
        assert_eq!(tree.position_at(6), Some((1, 0)));
        assert_eq!(tree.position_at(14), Some((2, 2)));
        assert_eq!(tree.position_at(tree.len()), Some((7, 7)));
        assert_eq!(tree.position_at(tree.len() + 1), None);
    }

    #[test]
    fn position_round_trips_through_line_start() {
        let tree = lorem();
        for offset in 0..=tree.len() {
            let (line, column) = tree.position_at(offset).unwrap();
            assert_eq!(tree.line_start(line).unwrap() + column, offset);
        }
    }

    #[test]
    fn position_inside_crlf_stays_on_its_line() {
        let tree = PieceTree::from_chunks(["ab\r\ncd".to_string()]);
        assert_eq!(tree.position_at(3), Some((0, 3)));
        assert_eq!(tree.position_at(4), Some((1, 0)));
    }

    #[test]
    fn char_boundaries() {
        let tree = PieceTree::from_chunks(["aé".to_string(), "ü".to_string()]);
        assert!(tree.is_char_boundary(0));
        assert!(tree.is_char_boundary(1));
        assert!(!tree.is_char_boundary(2));
        assert!(tree.is_char_boundary(3));
        assert!(!tree.is_char_boundary(4));
        assert!(tree.is_char_boundary(5));
        assert!(!tree.is_char_boundary(6));
    }
}
