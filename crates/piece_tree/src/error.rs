use std::ops::Range;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("insert offset {index} is out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("insert offset {index} is not on a char boundary")]
    NotCharBoundary { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteError {
    #[error("delete range {range:?} is out of bounds for length {len}")]
    OutOfBounds { range: Range<usize>, len: usize },
    #[error("delete boundary {index} is not on a char boundary")]
    NotCharBoundary { index: usize },
}

/// A broken structural invariant, reported by
/// [`PieceTree::check_invariants`](crate::PieceTree::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("root is red")]
    RedRoot,
    #[error("sentinel is red")]
    RedSentinel,
    #[error("red node {node} has a red child")]
    RedRed { node: usize },
    #[error("black height {left} on the left of node {node} but {right} on the right")]
    BlackHeight {
        node: usize,
        left: usize,
        right: usize,
    },
    #[error("node {node} holds an empty piece")]
    EmptyPiece { node: usize },
    #[error("node {node} has a broken parent link")]
    ParentLink { node: usize },
    #[error("node {node} caches {cached} {what} but its subtree holds {actual}")]
    Aggregate {
        node: usize,
        what: &'static str,
        cached: usize,
        actual: usize,
    },
    #[error("piece of node {node} covers line breaks {actual:?}, recorded {recorded:?}")]
    LineRange {
        node: usize,
        recorded: Range<usize>,
        actual: Range<usize>,
    },
}
