use crate::buffer::TextBuffer;
use piece_tree::{DEFAULT_GROWTH_LIMIT, PieceTree};

#[derive(Debug)]
pub struct TextBufferBuilder {
    chunks: Vec<String>,
    growth_limit: usize,
}

impl Default for TextBufferBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBufferBuilder {
    pub fn new() -> Self {
        Self {
            chunks: Vec::new(),
            growth_limit: DEFAULT_GROWTH_LIMIT,
        }
    }

    /// Accept a chunk of text (may include multiple lines). Each chunk
    /// becomes its own piece.
    pub fn accept_chunk(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.chunks.push(chunk.to_string());
    }

    /// Size below which a buffer keeps taking typed text in place.
    pub fn growth_limit(&mut self, limit: usize) -> &mut Self {
        self.growth_limit = limit;
        self
    }

    /// Finish building and return a `TextBuffer`.
    pub fn finish(self) -> TextBuffer {
        let mut tree = PieceTree::with_growth_limit(self.growth_limit);
        tree.append_chunks(self.chunks);
        TextBuffer::from_tree(tree)
    }
}
