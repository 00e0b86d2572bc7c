//! Offset translation between a generated document and its source.

use vtls_source::Span;

/// One contiguous mapped region: a generated-document span and the source
/// span it was produced from. Spans are equal-length; unmapped generated
/// regions (synthetic scaffolding) simply have no entry.
#[derive(Debug, Clone, Copy)]
pub struct Mapping {
    pub generated: Span,
    pub source: Span,
}

/// The offset-translation table between a generated document and its source.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    mappings: Vec<Mapping>,
}

impl SourceMap {
    #[must_use]
    pub fn new(mappings: Vec<Mapping>) -> Self {
        Self { mappings }
    }

    /// Translate a single generated-document offset to a source offset.
    #[must_use]
    pub fn source_offset(&self, offset: u32) -> Option<u32> {
        self.mappings.iter().find_map(|m| {
            if offset >= m.generated.start() && offset <= m.generated.end() {
                Some(m.source.start() + (offset - m.generated.start()))
            } else {
                None
            }
        })
    }

    /// Translate a half-open generated range to a source range. Both
    /// endpoints must fall inside one mapped region.
    #[must_use]
    pub fn source_range(&self, start: u32, end: u32) -> Option<(u32, u32)> {
        self.mappings.iter().find_map(|m| {
            if m.generated.contains_range(start, end) {
                let delta = m.source.start().wrapping_sub(m.generated.start());
                Some((start.wrapping_add(delta), end.wrapping_add(delta)))
            } else {
                None
            }
        })
    }
}
