use serde::Serialize;

/// A half-open byte range `[start, start + length)` within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    start: u32,
    length: u32,
}

impl Span {
    #[must_use]
    pub fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// Construct a span from half-open integer bounds.
    #[must_use]
    pub fn from_bounds(start: u32, end: u32) -> Self {
        Self::new(start, end.saturating_sub(start))
    }

    #[must_use]
    pub fn start(self) -> u32 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> u32 {
        self.start + self.length
    }

    #[must_use]
    pub fn length(self) -> u32 {
        self.length
    }

    #[must_use]
    pub fn contains_range(self, start: u32, end: u32) -> bool {
        start >= self.start && end <= self.end()
    }
}
