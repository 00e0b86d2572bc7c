//! Lightweight structural view of a script block.
//!
//! The typed engine owns real symbol resolution; the bridge only needs the
//! pieces of script structure that auto-import edits touch: the ordered
//! import statements and the default-export options object. The upstream
//! compiler extracts these; offsets are relative to the owning block and
//! translate to source positions via the block source map.

use vtls_source::Span;

/// One top-level import statement, in source order.
#[derive(Debug, Clone)]
pub struct ImportStatement {
    /// The statement's source text, trimmed.
    pub text: String,
    /// Offset just past the statement, relative to the block content.
    pub end: u32,
}

/// An object literal node: where it sits and the source text of each of its
/// properties, so it can be re-printed with a property appended.
#[derive(Debug, Clone)]
pub struct ObjectLiteral {
    pub span: Span,
    pub properties: Vec<String>,
}

/// The default export of a plain script block, when it is structurally a
/// component-options call.
#[derive(Debug, Clone, Default)]
pub struct ScriptExportDefault {
    /// The whole options argument object.
    pub args: Option<ObjectLiteral>,
    /// The `components` option object, when present.
    pub components_option: Option<ObjectLiteral>,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptAst {
    pub imports: Vec<ImportStatement>,
    pub export_default: Option<ScriptExportDefault>,
}

impl ScriptAst {
    #[must_use]
    pub fn last_import(&self) -> Option<&ImportStatement> {
        self.imports.last()
    }
}
