//! Component-tag classification for semantic highlighting.

use lsp_types::Range;
use rustc_hash::FxHashSet;
use vtls_workspace::TemplateData;
use vtls_workspace::TextDocument;

use crate::casing::hyphenate;
use crate::engines::MarkupScanner;
use crate::engines::TokenKind;
use crate::intrinsic::is_intrinsic_element;

/// The token types this crate reports, in legend order.
pub const SEMANTIC_TOKEN_TYPES: &[&str] = &["componentTag"];

const COMPONENT_TAG: u32 = 0;

/// One highlighted span, in absolute (not delta-encoded) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticTokenSpan {
    pub line: u32,
    pub character: u32,
    pub length: u32,
    pub token_type: u32,
    pub modifiers: u32,
}

/// Walk the document's tag tokens and report every start or end tag whose
/// name is a known component, in either its exact or kebab-case form.
pub(crate) fn classify_component_tokens(
    scanner: &mut dyn MarkupScanner,
    document: &TextDocument,
    template_data: &TemplateData,
    range: Option<Range>,
) -> Vec<SemanticTokenSpan> {
    let mut components: FxHashSet<String> =
        template_data.components.iter().cloned().collect();
    for name in &template_data.components {
        let hyphenated = hyphenate(name);
        if !is_intrinsic_element(&hyphenated) {
            components.insert(hyphenated);
        }
    }

    let (start, end) = match range {
        Some(range) => (
            document.position_to_offset(range.start).unwrap_or(0),
            document
                .position_to_offset(range.end)
                .unwrap_or_else(|| document.line_index().length()),
        ),
        None => (0, document.line_index().length()),
    };

    let mut result = Vec::new();
    loop {
        let token = scanner.scan();
        if token == TokenKind::Eos {
            break;
        }
        let offset = scanner.token_offset();
        // The scanner is linear only; past the range end nothing more can match.
        if offset > end {
            break;
        }
        if offset < start || !matches!(token, TokenKind::StartTag | TokenKind::EndTag) {
            continue;
        }
        if components.contains(scanner.token_text()) {
            let position = document.offset_to_position(offset);
            result.push(SemanticTokenSpan {
                line: position.line,
                character: position.character,
                length: scanner.token_length(),
                token_type: COMPONENT_TAG,
                modifiers: 0,
            });
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use lsp_types::Position;
    use lsp_types::Uri;
    use vtls_workspace::LanguageId;

    use super::*;
    use crate::testing::MockScanner;

    fn template_doc(content: &str) -> TextDocument {
        TextDocument::new(
            Uri::from_str("file:///app/Current.vue.template").unwrap(),
            content.to_string(),
            1,
            LanguageId::Html,
        )
    }

    fn data(components: &[&str]) -> TemplateData {
        TemplateData {
            revision: 1,
            components: components.iter().map(ToString::to_string).collect(),
            ..TemplateData::default()
        }
    }

    #[test]
    fn test_tags_both_casings_both_directions() {
        let document = template_doc("<div><MyWidget><my-widget></my-widget></MyWidget></div>");
        let mut scanner = MockScanner::new(document.content());

        let spans =
            classify_component_tokens(&mut scanner, &document, &data(&["MyWidget"]), None);

        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].line, 0);
        assert_eq!(spans[0].character, 6);
        assert_eq!(spans[0].length, 8);
        assert!(spans.iter().all(|span| span.token_type == 0));
    }

    #[test]
    fn test_intrinsic_collision_excludes_kebab_form_only() {
        let document = template_doc("<div><Div></Div></div>");
        let mut scanner = MockScanner::new(document.content());

        let spans = classify_component_tokens(&mut scanner, &document, &data(&["Div"]), None);

        // "Div" highlights; the intrinsic "div" does not.
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].character, 6);
    }

    #[test]
    fn test_range_limits_scan() {
        let document = template_doc("<MyWidget></MyWidget>\n<MyWidget></MyWidget>");
        let mut scanner = MockScanner::new(document.content());

        let spans = classify_component_tokens(
            &mut scanner,
            &document,
            &data(&["MyWidget"]),
            Some(Range::new(Position::new(0, 0), Position::new(0, 21))),
        );

        assert_eq!(spans.len(), 2);
        assert!(spans.iter().all(|span| span.line == 0));
    }
}
