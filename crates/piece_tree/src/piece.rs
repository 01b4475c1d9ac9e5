use crate::string_buffer::StringBuffer;

/// A view of `length` bytes of one buffer, starting at `start`.
///
/// `line_start..line_start + line_feed_cnt` indexes the buffer's line breaks
/// whose final byte falls inside the view. It is re-derived after every
/// change to `start` or `length`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Piece {
    pub(crate) buffer_idx: usize,
    pub(crate) start: usize,
    pub(crate) length: usize,
    pub(crate) line_start: usize,
    pub(crate) line_feed_cnt: usize,
}

impl Piece {
    pub fn new(buffer_idx: usize, buffer: &StringBuffer, start: usize, length: usize) -> Self {
        let mut piece = Self {
            buffer_idx,
            start,
            length,
            line_start: 0,
            line_feed_cnt: 0,
        };
        piece.update_line_range(buffer, 0);
        piece
    }

    pub fn buffer_idx(&self) -> usize {
        self.buffer_idx
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn line_feed_cnt(&self) -> usize {
        self.line_feed_cnt
    }

    pub fn text<'a>(&self, buffer: &'a StringBuffer) -> &'a str {
        buffer.read(self.start, self.length)
    }

    /// The piece ends where its buffer ends, and the buffer is still short
    /// enough to take appended text.
    pub fn is_growable(&self, buffer: &StringBuffer, growth_limit: usize) -> bool {
        buffer.len() < growth_limit && self.end() == buffer.len()
    }

    pub fn resize(&mut self, buffer: &StringBuffer, length: usize) {
        self.length = length;
        self.update_line_range(buffer, self.line_start);
    }

    pub fn trim_start(&mut self, buffer: &StringBuffer, n: usize) {
        assert!(n <= self.length, "trim of {n} exceeds piece length {}", self.length);
        self.start += n;
        self.length -= n;
        self.update_line_range(buffer, self.line_start);
    }

    pub fn trim_end(&mut self, buffer: &StringBuffer, n: usize) {
        assert!(n <= self.length, "trim of {n} exceeds piece length {}", self.length);
        self.resize(buffer, self.length - n);
    }

    /// Shortens this piece to `index` bytes and returns the piece that
    /// follows the `gap` bytes after it.
    pub fn split_off(&mut self, buffer: &StringBuffer, index: usize, gap: usize) -> Piece {
        assert!(
            index > 0 && index + gap < self.length,
            "split at {index} (gap {gap}) outside piece of length {}",
            self.length
        );

        let mut rest = Piece {
            buffer_idx: self.buffer_idx,
            start: self.start + index + gap,
            length: self.length - index - gap,
            line_start: 0,
            line_feed_cnt: 0,
        };
        rest.update_line_range(buffer, self.line_start);

        self.resize(buffer, index);
        rest
    }

    fn update_line_range(&mut self, buffer: &StringBuffer, from: usize) {
        let range = buffer.line_range(from, self.start, self.end());
        self.line_start = range.start;
        self.line_feed_cnt = range.len();
    }
}
