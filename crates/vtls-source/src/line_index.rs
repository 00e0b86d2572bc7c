use lsp_types::Position;

/// Pre-computed line start positions for efficient position/offset conversion.
///
/// Offsets are UTF-8 byte offsets; LSP positions carry UTF-16 code-unit
/// columns. Line starts give O(log n) line lookup, and the column is
/// converted by walking only the one affected line.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    length: u32,
}

impl LineIndex {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut pos = 0;

        for c in text.chars() {
            pos += u32::try_from(c.len_utf8()).unwrap_or(0);
            if c == '\n' {
                line_starts.push(pos);
            }
        }

        Self {
            line_starts,
            length: pos,
        }
    }

    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Convert a UTF-16 LSP position to a UTF-8 byte offset into `text`.
    #[must_use]
    pub fn offset(&self, position: Position, text: &str) -> Option<u32> {
        let line_start = *self.line_starts.get(position.line as usize)?;
        if position.character == 0 {
            return Some(line_start);
        }

        let line_end = self
            .line_starts
            .get(position.line as usize + 1)
            .copied()
            .unwrap_or(self.length);
        let line_text = text.get(line_start as usize..line_end as usize)?;

        let mut utf16_pos = 0;
        let mut utf8_pos = 0;
        for c in line_text.chars() {
            if utf16_pos >= position.character {
                break;
            }
            utf16_pos += u32::try_from(c.len_utf16()).unwrap_or(0);
            utf8_pos += u32::try_from(c.len_utf8()).unwrap_or(0);
        }

        Some(line_start + utf8_pos)
    }

    /// Convert a UTF-8 byte offset into `text` to a UTF-16 LSP position.
    #[must_use]
    pub fn position(&self, offset: u32, text: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        };

        let line_start = self.line_starts[line];
        let character = text
            .get(line_start as usize..offset as usize)
            .map_or(offset - line_start, |prefix| {
                u32::try_from(prefix.chars().map(char::len_utf16).sum::<usize>()).unwrap_or(0)
            });

        Position::new(u32::try_from(line).unwrap_or(0), character)
    }
}
