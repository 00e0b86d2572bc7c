//! Compiler-produced artifacts of a single-file component.

use lsp_types::CompletionItem;
use lsp_types::Uri;
use vtls_source::Span;

use crate::source_map::SourceMap;

/// One block of a single-file component, as reported by the upstream parser.
#[derive(Debug, Clone)]
pub struct SfcBlock {
    /// Offset just past the block's opening tag, in the compiler's
    /// normalized document space (translate via the block source map).
    pub start_tag_end: u32,
}

/// The block structure of a single-file component.
#[derive(Debug, Clone, Default)]
pub struct SfcDescriptor {
    pub template: Option<SfcBlock>,
    pub script: Option<SfcBlock>,
    pub script_setup: Option<SfcBlock>,
}

/// The generated typed document for a template region. Its content carries
/// the probe markers inserted by the upstream compiler (see [`crate::markers`]).
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub uri: Uri,
    pub content: String,
}

/// An error or warning produced by the template compiler, positioned in
/// generated-document offsets.
#[derive(Debug, Clone)]
pub struct CompileMessage {
    pub span: Span,
    pub message: String,
    pub code: Option<i32>,
}

/// The compiled form of a template region: the generated markup text, the
/// compiler's errors and warnings on it, and the map back to the embedded
/// template document.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    pub html: String,
    pub errors: Vec<CompileMessage>,
    pub warnings: Vec<CompileMessage>,
    pub mapping: SourceMap,
}

/// A snapshot of the typed metadata derived from a template.
///
/// Snapshots are identity-keyed: a new snapshot gets a new `revision` even
/// when textually identical to its predecessor, and downstream caches keyed
/// on the revision treat it as fresh data.
#[derive(Debug, Clone, Default)]
pub struct TemplateData {
    pub revision: u64,
    /// Typed completion items for the components in scope (label = name).
    pub component_items: Vec<CompletionItem>,
    /// Component names in scope, exact casing.
    pub components: Vec<String>,
    /// Tag names actually referenced by the template, including
    /// dotted-namespace references.
    pub tag_names: Vec<String>,
}
