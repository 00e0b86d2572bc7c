//! Collaborator seams: the typed-language engine, the markup engine, and
//! the configuration host.
//!
//! The bridge never resolves typed symbols or parses markup itself; it only
//! specifies what it asks of these collaborators. Probe-style calls treat
//! any [`EngineError`] as "no data" at the call site.

use async_trait::async_trait;
use camino::Utf8Path;
use lsp_types::CompletionContext;
use lsp_types::CompletionItem;
use lsp_types::CompletionList;
use lsp_types::Diagnostic;
use lsp_types::Hover;
use lsp_types::Position;
use lsp_types::Uri;
use thiserror::Error;
use vtls_conf::NameCasing;
use vtls_workspace::TextDocument;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("typed engine request failed: {0}")]
    Typed(String),
}

/// One auto-import code action offered by the typed engine.
#[derive(Debug, Clone)]
pub struct ImportAction {
    pub description: String,
    /// The new text of each text change the action would apply.
    pub text_changes: Vec<String>,
}

/// The external typed-language service.
#[async_trait]
pub trait TypedEngine: Send + Sync {
    /// Completion at a byte offset within a generated document.
    async fn complete(&self, uri: &Uri, offset: u32) -> Result<CompletionList, EngineError>;

    /// Lazily enrich a completion item previously returned by [`Self::complete`].
    async fn resolve_completion(&self, item: CompletionItem)
        -> Result<CompletionItem, EngineError>;

    /// Ask for an auto-import code action binding `symbol` to `import_file`
    /// inside the script document at `uri`.
    async fn import_code_action(
        &self,
        uri: &Uri,
        symbol: &str,
        import_file: &Utf8Path,
    ) -> Result<Option<ImportAction>, EngineError>;
}

/// A tag in a synthesized markup grammar.
#[derive(Debug, Clone, Default)]
pub struct TagData {
    pub name: String,
    pub description: Option<String>,
    pub attributes: Vec<AttributeData>,
}

/// An attribute in a synthesized markup grammar.
#[derive(Debug, Clone)]
pub struct AttributeData {
    pub name: String,
    pub description: Option<String>,
}

impl AttributeData {
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }
}

/// One grammar contribution: tags plus attributes valid on any tag.
#[derive(Debug, Clone, Default)]
pub struct GrammarData {
    pub tags: Vec<TagData>,
    pub global_attributes: Vec<AttributeData>,
}

/// Tokens the markup scanner reports. Only tag-name tokens matter to the
/// bridge; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    StartTag,
    EndTag,
    Other,
    Eos,
}

/// A restartable linear scanner over a markup document.
pub trait MarkupScanner: Send {
    fn scan(&mut self) -> TokenKind;
    fn token_offset(&self) -> u32;
    fn token_length(&self) -> u32;
    fn token_text(&self) -> &str;
}

/// The external markup-language service.
///
/// The custom-grammar slot is shared, global, mutable state across requests;
/// callers must pair every [`Self::install_grammar`] with a
/// [`Self::clear_grammar`] on every exit path (see [`InstalledGrammar`]).
#[async_trait]
pub trait MarkupEngine: Send + Sync {
    fn install_grammar(&self, grammar: Vec<GrammarData>);
    fn clear_grammar(&self);

    async fn complete(
        &self,
        document: &TextDocument,
        position: Position,
        context: Option<CompletionContext>,
    ) -> Option<CompletionList>;

    async fn hover(&self, document: &TextDocument, position: Position) -> Option<Hover>;

    async fn validate(&self, document: &TextDocument) -> Vec<Diagnostic>;

    fn scanner(&self, document: &TextDocument) -> Option<Box<dyn MarkupScanner>>;
}

/// Scoped installation of a custom grammar; reverts the markup engine's
/// grammar slot to empty when dropped.
pub struct InstalledGrammar<'a> {
    engine: &'a dyn MarkupEngine,
}

impl<'a> InstalledGrammar<'a> {
    pub fn install(engine: &'a dyn MarkupEngine, grammar: Vec<GrammarData>) -> Self {
        engine.install_grammar(grammar);
        Self { engine }
    }
}

impl Drop for InstalledGrammar<'_> {
    fn drop(&mut self) {
        self.engine.clear_grammar();
    }
}

/// Per-document configuration lookup. `None` means "not configured";
/// callers apply their own defaults.
#[async_trait]
pub trait ConfigurationHost: Send + Sync {
    async fn name_casing(&self, uri: &Uri) -> Option<NameCasing>;
    async fn auto_import_enabled(&self, uri: &Uri) -> Option<bool>;
}

#[async_trait]
impl ConfigurationHost for vtls_conf::Settings {
    async fn name_casing(&self, _uri: &Uri) -> Option<NameCasing> {
        Some(self.casing)
    }

    async fn auto_import_enabled(&self, _uri: &Uri) -> Option<bool> {
        Some(self.completion.auto_import_component)
    }
}
