//! Remapping of template-compiler messages into the embedded document.
//!
//! Messages are positioned in compiled-output offsets. When the source map
//! covers a message's span it lands at the mapped source range; otherwise the
//! diagnostic is anchored at the document start with the offending compiled
//! fragment quoted in the message, so it is never silently dropped.

use lsp_types::Diagnostic;
use lsp_types::DiagnosticSeverity;
use lsp_types::NumberOrString;
use lsp_types::Range;
use vtls_workspace::CompileMessage;
use vtls_workspace::CompiledTemplate;
use vtls_workspace::TextDocument;

const DIAGNOSTIC_SOURCE: &str = "vue";

pub(crate) fn remap_compiler_diagnostics(
    compiled: &CompiledTemplate,
    document: &TextDocument,
) -> Vec<Diagnostic> {
    let errors = compiled
        .errors
        .iter()
        .map(|message| (message, DiagnosticSeverity::ERROR));
    let warnings = compiled
        .warnings
        .iter()
        .map(|message| (message, DiagnosticSeverity::WARNING));

    errors
        .chain(warnings)
        .map(|(message, severity)| remap_message(message, severity, compiled, document))
        .collect()
}

fn remap_message(
    message: &CompileMessage,
    severity: DiagnosticSeverity,
    compiled: &CompiledTemplate,
    document: &TextDocument,
) -> Diagnostic {
    let start = message.span.start();
    let end = message.span.end();
    let mut text = message.message.clone();

    let (source_start, source_end) = match compiled.mapping.source_range(start, end) {
        Some(range) => range,
        None => {
            let clipped = compiled
                .html
                .get(start as usize..end as usize)
                .unwrap_or("");
            text.push_str("\n```html\n");
            text.push_str(clipped.trim());
            text.push_str("\n```");
            (0, 0)
        }
    };

    Diagnostic {
        range: Range::new(
            document.offset_to_position(source_start),
            document.offset_to_position(source_end),
        ),
        severity: Some(severity),
        code: message.code.map(NumberOrString::Number),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: text,
        ..Diagnostic::default()
    }
}
