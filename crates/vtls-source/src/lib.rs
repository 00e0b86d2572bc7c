//! Offsets, spans, and line indexing shared by every vtls crate.

mod line_index;
mod span;

pub use line_index::LineIndex;
pub use span::Span;
