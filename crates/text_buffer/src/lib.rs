mod buffer;
mod buffer_builder;
mod position;

pub use crate::buffer::TextBuffer;
pub use crate::buffer_builder::TextBufferBuilder;
pub use crate::position::Position;
pub use piece_tree::{Chunks, Snapshot};
