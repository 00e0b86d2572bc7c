//! In-memory text documents with pre-computed line indexing.

use lsp_types::Position;
use lsp_types::Range;
use lsp_types::Uri;
use vtls_source::LineIndex;

/// The language a text document is written in, as reported by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LanguageId {
    /// An embedded template markup region.
    Html,
    /// A whole single-file component.
    Vue,
    Other,
}

impl LanguageId {
    #[must_use]
    pub fn from_str_id(id: &str) -> Self {
        match id {
            "html" => Self::Html,
            "vue" => Self::Vue,
            _ => Self::Other,
        }
    }
}

/// An open document: content, version, and a line index for O(log n)
/// position lookups.
#[derive(Clone, Debug)]
pub struct TextDocument {
    uri: Uri,
    content: String,
    version: i32,
    language_id: LanguageId,
    line_index: LineIndex,
}

impl TextDocument {
    #[must_use]
    pub fn new(uri: Uri, content: String, version: i32, language_id: LanguageId) -> Self {
        let line_index = LineIndex::new(&content);
        Self {
            uri,
            content,
            version,
            language_id,
            line_index,
        }
    }

    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn version(&self) -> i32 {
        self.version
    }

    #[must_use]
    pub fn language_id(&self) -> LanguageId {
        self.language_id
    }

    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    #[must_use]
    pub fn get_text_range(&self, range: Range) -> Option<String> {
        let start = self.line_index.offset(range.start, &self.content)? as usize;
        let end = self.line_index.offset(range.end, &self.content)? as usize;
        self.content.get(start..end).map(ToString::to_string)
    }

    #[must_use]
    pub fn position_to_offset(&self, position: Position) -> Option<u32> {
        self.line_index.offset(position, &self.content)
    }

    #[must_use]
    pub fn offset_to_position(&self, offset: u32) -> Position {
        self.line_index.position(offset, &self.content)
    }
}
