use std::ops::Range;

/// A single `\n` or `\r\n` inside a [`StringBuffer`], as absolute byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBreak {
    pub start: usize,
    pub end: usize,
}

/// Append-only text storage shared by every piece that points into it.
#[derive(Debug, Clone, Default)]
pub struct StringBuffer {
    buffer: String,
    line_breaks: Vec<LineBreak>,
}

impl StringBuffer {
    pub fn new(buffer: String) -> Self {
        let line_breaks = Self::create_line_breaks(&buffer, 0);
        Self {
            buffer,
            line_breaks,
        }
    }

    pub fn create_line_breaks(text: &str, base: usize) -> Vec<LineBreak> {
        let mut line_breaks = Vec::new();
        let bytes = text.as_bytes();
        let len = bytes.len();
        let mut i = 0;

        while i < len {
            match bytes[i] {
                b'\r' if i + 1 < len && bytes[i + 1] == b'\n' => {
                    line_breaks.push(LineBreak {
                        start: base + i,
                        end: base + i + 2,
                    });
                    i += 1; // skip the \n
                }
                b'\n' => {
                    line_breaks.push(LineBreak {
                        start: base + i,
                        end: base + i + 1,
                    });
                }
                // a lone \r does not end a line
                _ => {}
            }

            i += 1;
        }

        line_breaks
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn line_breaks(&self) -> &[LineBreak] {
        &self.line_breaks
    }

    /// Appends `text`, scanning only the new bytes for line breaks.
    ///
    /// A `\r` already at the tail followed by a `\n` at the head of `text` is
    /// recorded as a lone `\n`; earlier entries are never rewritten.
    pub fn append(&mut self, text: &str) {
        let base = self.buffer.len();
        self.line_breaks.extend(Self::create_line_breaks(text, base));
        self.buffer.push_str(text);
    }

    pub fn read(&self, start: usize, count: usize) -> &str {
        &self.buffer[start..start + count]
    }

    pub fn is_char_boundary(&self, offset: usize) -> bool {
        self.buffer.is_char_boundary(offset)
    }

    /// Offset just past the line break at `index`.
    pub fn line_break_end(&self, index: usize) -> usize {
        self.line_breaks[index].end
    }

    /// Index of the first line break at or after `from` that is not entirely
    /// before `offset`.
    ///
    /// An `offset` falling between the `\r` and `\n` of a CRLF resolves to that
    /// CRLF, so the pair is owned by whichever side of a cut holds its `\n`.
    pub fn find_line_break(&self, from: usize, offset: usize) -> usize {
        from + self.line_breaks[from..].partition_point(|lb| lb.end <= offset)
    }

    /// Line breaks whose last byte lies in `[start, end)`.
    pub fn line_range(&self, from: usize, start: usize, end: usize) -> Range<usize> {
        let first = self.find_line_break(from, start);
        let last = self.find_line_break(first, end);
        first..last
    }
}
