//! The template intelligence bridge.
//!
//! Language features for the embedded template region of a single-file
//! component are produced by a markup engine that only understands HTML and
//! a typed engine that only understands the generated typed document. This
//! crate sits between them: per request it discovers the typed shape of the
//! components in scope, synthesizes a markup grammar from it, runs the markup
//! engine against that grammar, and rewrites the results so they read as
//! first-class template intelligence.

mod casing;
mod completions;
mod diagnostics;
mod engines;
mod grammar;
mod intrinsic;
mod item_id;
mod metadata;
mod resolve;
mod semantic;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use camino::Utf8PathBuf;
use dashmap::DashSet;
use lsp_types::CompletionContext;
use lsp_types::CompletionItem;
use lsp_types::CompletionList;
use lsp_types::Diagnostic;
use lsp_types::Hover;
use lsp_types::Position;
use lsp_types::Range;
use vtls_workspace::DocumentStore;
use vtls_workspace::LanguageId;
use vtls_workspace::TextDocument;

use crate::metadata::ComponentMetadataCache;

pub use crate::casing::camelize;
pub use crate::casing::capitalize;
pub use crate::casing::hyphenate;
pub use crate::casing::pascal_case;
pub use crate::engines::AttributeData;
pub use crate::engines::ConfigurationHost;
pub use crate::engines::EngineError;
pub use crate::engines::GrammarData;
pub use crate::engines::ImportAction;
pub use crate::engines::InstalledGrammar;
pub use crate::engines::MarkupEngine;
pub use crate::engines::MarkupScanner;
pub use crate::engines::TagData;
pub use crate::engines::TokenKind;
pub use crate::engines::TypedEngine;
pub use crate::intrinsic::is_intrinsic_element;
pub use crate::item_id::ItemId;
pub use crate::item_id::ItemKind;
pub use crate::resolve::ResolveData;
pub use crate::semantic::SemanticTokenSpan;
pub use crate::semantic::SEMANTIC_TOKEN_TYPES;

/// Characters that should trigger completion inside a template, on top of
/// whatever the markup engine registers itself.
pub const TRIGGER_CHARACTERS: &[&str] = &["@"];

pub struct TemplateBridge {
    pub(crate) typed: Arc<dyn TypedEngine>,
    pub(crate) markup: Arc<dyn MarkupEngine>,
    pub(crate) config: Arc<dyn ConfigurationHost>,
    pub(crate) documents: Arc<DocumentStore>,
    pub(crate) workspace_root: Utf8PathBuf,
    pub(crate) metadata: ComponentMetadataCache,
    pub(crate) edit_markers: DashSet<(u32, u32)>,
}

impl TemplateBridge {
    #[must_use]
    pub fn new(
        typed: Arc<dyn TypedEngine>,
        markup: Arc<dyn MarkupEngine>,
        config: Arc<dyn ConfigurationHost>,
        documents: Arc<DocumentStore>,
        workspace_root: Utf8PathBuf,
    ) -> Self {
        Self {
            typed,
            markup,
            config,
            documents,
            workspace_root,
            metadata: ComponentMetadataCache::new(),
            edit_markers: DashSet::new(),
        }
    }

    /// Completion inside an embedded template document.
    ///
    /// When the document belongs to a known single-file component, the
    /// markup engine runs with a synthesized grammar installed for the
    /// duration of the request and the resulting list is post-processed.
    /// Plain HTML documents pass straight through.
    pub async fn complete(
        &self,
        document: &TextDocument,
        position: Position,
        context: Option<CompletionContext>,
    ) -> Option<CompletionList> {
        if document.language_id() != LanguageId::Html {
            return None;
        }
        let vue_doc = self.documents.by_template_uri(document.uri());

        let mut side_table = None;
        let _installed = match &vue_doc {
            Some(vue_doc) => {
                let casing = self
                    .config
                    .name_casing(document.uri())
                    .await
                    .unwrap_or_default();
                let auto_import = self
                    .config
                    .auto_import_enabled(document.uri())
                    .await
                    .unwrap_or(true);

                let metadata = self.metadata.get(vue_doc, self.typed.as_ref()).await;
                let synthesized = grammar::synthesize_grammar(
                    vue_doc,
                    &self.documents,
                    casing,
                    &metadata.map,
                    auto_import,
                );
                side_table = Some(synthesized.side_table);
                Some(InstalledGrammar::install(
                    self.markup.as_ref(),
                    synthesized.grammar,
                ))
            }
            None => None,
        };

        let mut list = self.markup.complete(document, position, context).await?;
        if let (Some(vue_doc), Some(side_table)) = (&vue_doc, &side_table) {
            completions::post_process(
                &mut list,
                document,
                vue_doc,
                side_table,
                &self.workspace_root,
            );
        }
        Some(list)
    }

    /// Resolve an item previously returned by [`Self::complete`].
    pub async fn resolve_completion(&self, mut item: CompletionItem) -> CompletionItem {
        let Some(data) = item.data.take() else {
            return item;
        };
        match serde_json::from_value::<ResolveData>(data.clone()) {
            Ok(ResolveData::Grammar { ts_item }) => self.resolve_grammar_item(item, ts_item).await,
            Ok(ResolveData::AutoImport {
                source_document_uri,
                import_uri,
            }) => {
                self.resolve_auto_import_item(item, &source_document_uri, &import_uri)
                    .await
            }
            Err(_) => {
                // Foreign payload; hand it back untouched.
                item.data = Some(data);
                item
            }
        }
    }

    /// Hover inside an embedded template document.
    ///
    /// For known component templates any grammar left installed by an
    /// earlier completion request is cleared before delegating.
    pub async fn hover(&self, document: &TextDocument, position: Position) -> Option<Hover> {
        if document.language_id() != LanguageId::Html {
            return None;
        }
        if self.documents.by_template_uri(document.uri()).is_some() {
            self.markup.clear_grammar();
        }
        self.markup.hover(document, position).await
    }

    /// Diagnostics for an embedded template document: the markup engine's
    /// own findings plus the template compiler's remapped messages.
    pub async fn validate(&self, document: &TextDocument) -> Vec<Diagnostic> {
        if document.language_id() != LanguageId::Html {
            return Vec::new();
        }
        let mut diagnostics = self.markup.validate(document).await;
        if let Some(compiled) = self
            .documents
            .by_template_uri(document.uri())
            .as_deref()
            .and_then(vtls_workspace::VueDocument::compiled_template)
        {
            diagnostics.extend(diagnostics::remap_compiler_diagnostics(compiled, document));
        }
        diagnostics
    }

    /// Semantic tokens marking component tags, optionally limited to a range.
    #[must_use]
    pub fn semantic_tokens(
        &self,
        document: &TextDocument,
        range: Option<Range>,
    ) -> Vec<SemanticTokenSpan> {
        if document.language_id() != LanguageId::Html {
            return Vec::new();
        }
        let Some(vue_doc) = self.documents.by_template_uri(document.uri()) else {
            return Vec::new();
        };
        let Some(mut scanner) = self.markup.scanner(document) else {
            return Vec::new();
        };
        semantic::classify_component_tokens(
            scanner.as_mut(),
            document,
            vue_doc.template_data(),
            range,
        )
    }

    /// Whether a source range was produced by one of this bridge's own
    /// auto-import edits. Document-edit machinery uses this to route such
    /// ranges to the component source file instead of an embedded region.
    #[must_use]
    pub fn resolve_embedded_range(&self, range: Range) -> Option<Range> {
        let start = (range.start.line, range.start.character);
        let end = (range.end.line, range.end.character);
        (self.edit_markers.contains(&start) && self.edit_markers.contains(&end)).then_some(range)
    }

    pub(crate) fn record_edit_position(&self, position: Position) {
        self.edit_markers.insert((position.line, position.character));
    }
}
