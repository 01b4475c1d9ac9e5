/// A place in the document, as an editor hands it over.
///
/// Offsets are bytes. Negative values count back from the end: an offset of
/// `-1` is the last byte, a line of `-1` the last line. Lines and columns are
/// zero-based, and the column is added to the start of the line without
/// checking that it stays on that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Offset(isize),
    LineColumn(isize, isize),
}

impl Default for Position {
    fn default() -> Self {
        Position::Offset(0)
    }
}

// Values outside `isize` clamp to its bounds instead of wrapping.
fn saturate(value: i128) -> isize {
    value.clamp(isize::MIN as i128, isize::MAX as i128) as isize
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Position {
                fn from(offset: $t) -> Self {
                    Position::Offset(saturate(offset as i128))
                }
            }

            impl From<($t, $t)> for Position {
                fn from((line, column): ($t, $t)) -> Self {
                    Position::LineColumn(saturate(line as i128), saturate(column as i128))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, isize, u32, u64, usize);
