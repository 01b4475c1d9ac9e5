use std::convert::Infallible;
use std::str::FromStr;

use log::debug;
use piece_tree::{Chunks, PieceTree, Snapshot};

use crate::position::Position;

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    tree: PieceTree,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_tree(tree: PieceTree) -> Self {
        Self { tree }
    }

    /// The underlying piece tree.
    pub fn tree(&self) -> &PieceTree {
        &self.tree
    }

    /// Get the document byte length.
    pub fn char_count(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Get the number of lines (empty doc => 0 lines).
    pub fn line_count(&self) -> usize {
        self.tree.line_count()
    }

    /// Resolves `position` to a byte offset, or `None` when it falls outside
    /// the document or inside a character.
    pub fn offset_of(&self, position: impl Into<Position>) -> Option<usize> {
        self.index_of(position.into())
            .filter(|index| self.tree.is_char_boundary(*index))
    }

    // Byte index of `position` if it lies within the document, which may
    // still be inside a character.
    fn index_of(&self, position: Position) -> Option<usize> {
        let count = self.tree.len() as isize;
        let index = match position {
            Position::Offset(offset) => offset,
            Position::LineColumn(line, column) => {
                let line = match line {
                    l if l < 0 => (self.tree.line_count() as isize + l).max(0),
                    l => l,
                };
                let start = self.tree.line_start(line as usize)?;
                (start as isize).checked_add(column)?
            }
        };

        let index = match index {
            i if i < 0 => (count + i).max(0),
            i => i,
        };
        if index > count {
            return None;
        }
        Some(index as usize)
    }

    // Start and end of a range. A missing or out-of-range end means the end
    // of the document, an end inside a character makes the range invalid.
    // A reversed range collapses to `start..start`.
    fn range_of(&self, start: Position, end: Option<Position>) -> Option<(usize, usize)> {
        let start = self.offset_of(start)?;
        let end = match end.and_then(|end| self.index_of(end)) {
            Some(end) if self.tree.is_char_boundary(end) => end,
            Some(_) => return None,
            None => self.tree.len(),
        };
        Some((start, end.max(start)))
    }

    /// Lazily yield the fragments between `start` and `end` (or the end of
    /// the document), one per piece.
    pub fn chunks(&self, start: impl Into<Position>, end: Option<Position>) -> Chunks<'_> {
        match self.range_of(start.into(), end) {
            Some((start, end)) => self.tree.read(start, end - start),
            None => self.tree.read(self.tree.len(), 0),
        }
    }

    /// Get the text between `start` and `end` (or the end of the document).
    /// Invalid positions give an empty string.
    pub fn read(&self, start: impl Into<Position>, end: Option<Position>) -> String {
        self.chunks(start, end).collect()
    }

    /// Get complete text content.
    pub fn get_text(&self) -> String {
        self.tree.get_text()
    }

    /// Insert `value` at `position`. Does nothing if the position is invalid.
    pub fn insert(&mut self, position: impl Into<Position>, value: &str) {
        let position = position.into();
        let Some(offset) = self.offset_of(position) else {
            debug!("insert at invalid position {:?} ignored", position);
            return;
        };

        if let Err(err) = self.tree.insert(offset, value) {
            debug!("insert rejected: {}", err);
        }
    }

    /// Delete from `start` up to `end` (or the end of the document).
    pub fn delete(&mut self, start: impl Into<Position>, end: Option<Position>) {
        let start = start.into();
        let Some((from, to)) = self.range_of(start, end) else {
            debug!("delete from invalid position {:?} ignored", start);
            return;
        };

        if let Err(err) = self.tree.delete(from..to) {
            debug!("delete rejected: {}", err);
        }
    }

    /// Insert `value` at the end of the document.
    pub fn append(&mut self, value: &str) {
        self.insert(self.char_count(), value);
    }

    /// Clear the document, optionally replacing its content with `value`.
    ///
    /// Snapshots taken before the reset can still be restored.
    pub fn reset(&mut self, value: Option<&str>) {
        self.delete(0, None);
        if let Some(value) = value {
            self.insert(0, value);
        }
    }

    pub fn save(&self) -> Snapshot {
        self.tree.save()
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.tree.restore(snapshot);
    }

    /// Get content of a line (0-based), without its line break.
    pub fn line(&self, line: usize) -> Option<String> {
        if line >= self.line_count() {
            return None;
        }

        let start = self.tree.line_start(line)?;
        let end = self
            .tree
            .line_start(line + 1)
            .unwrap_or(self.tree.len());

        let mut content: String = self.tree.read(start, end - start).collect();
        if content.ends_with('\n') {
            content.pop();
            if content.ends_with('\r') {
                content.pop();
            }
        }
        Some(content)
    }

    /// Get all lines (without EOL).
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .filter_map(|line| self.line(line))
            .collect()
    }

    /// 0-based byte offset to 0-based (line, column).
    pub fn position_at(&self, offset: usize) -> Option<(usize, usize)> {
        self.tree.position_at(offset)
    }
}

impl FromStr for TextBuffer {
    type Err = Infallible;

    /// Build from a single string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tree(PieceTree::from_chunks([s.to_string()])))
    }
}
