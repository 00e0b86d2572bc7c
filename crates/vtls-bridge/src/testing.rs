//! Shared test doubles and fixtures.

use std::str::FromStr;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use lsp_types::CompletionItem;
use lsp_types::CompletionContext;
use lsp_types::CompletionItemKind;
use lsp_types::CompletionList;
use lsp_types::Diagnostic;
use lsp_types::Documentation;
use lsp_types::Hover;
use lsp_types::Position;
use lsp_types::Uri;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use vtls_conf::Settings;
use vtls_source::Span;
use vtls_workspace::markers;
use vtls_workspace::DocumentStore;
use vtls_workspace::GeneratedDocument;
use vtls_workspace::ImportStatement;
use vtls_workspace::LanguageId;
use vtls_workspace::Mapping;
use vtls_workspace::ObjectLiteral;
use vtls_workspace::ScriptAst;
use vtls_workspace::ScriptExportDefault;
use vtls_workspace::SfcBlock;
use vtls_workspace::SfcDescriptor;
use vtls_workspace::SourceMap;
use vtls_workspace::TemplateData;
use vtls_workspace::TextDocument;
use vtls_workspace::VueDocument;

use crate::engines::EngineError;
use crate::engines::GrammarData;
use crate::engines::ImportAction;
use crate::engines::MarkupEngine;
use crate::engines::MarkupScanner;
use crate::engines::TokenKind;
use crate::engines::TypedEngine;
use crate::TemplateBridge;

pub(crate) fn item(label: &str) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        ..CompletionItem::default()
    }
}

pub(crate) fn item_with_kind(label: &str, kind: CompletionItemKind) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        kind: Some(kind),
        ..CompletionItem::default()
    }
}

pub(crate) fn item_with_detail(label: &str, detail: &str) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        detail: Some(detail.to_string()),
        ..CompletionItem::default()
    }
}

#[derive(Default)]
pub(crate) struct MockTypedEngine {
    pub completions: Mutex<FxHashMap<u32, Vec<CompletionItem>>>,
    pub failing_offsets: FxHashSet<u32>,
    pub resolved: Option<CompletionItem>,
    pub import_action: Option<ImportAction>,
    pub complete_calls: AtomicUsize,
}

#[async_trait]
impl TypedEngine for MockTypedEngine {
    async fn complete(&self, _uri: &Uri, offset: u32) -> Result<CompletionList, EngineError> {
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_offsets.contains(&offset) {
            return Err(EngineError::Typed("probe rejected".to_string()));
        }
        let items = self
            .completions
            .lock()
            .unwrap()
            .get(&offset)
            .cloned()
            .unwrap_or_default();
        Ok(CompletionList {
            is_incomplete: false,
            items,
        })
    }

    async fn resolve_completion(
        &self,
        item: CompletionItem,
    ) -> Result<CompletionItem, EngineError> {
        Ok(self.resolved.clone().unwrap_or(item))
    }

    async fn import_code_action(
        &self,
        _uri: &Uri,
        _symbol: &str,
        _import_file: &Utf8Path,
    ) -> Result<Option<ImportAction>, EngineError> {
        Ok(self.import_action.clone())
    }
}

#[derive(Default)]
pub(crate) struct MockMarkupEngine {
    pub grammar: Mutex<Vec<GrammarData>>,
    pub install_count: AtomicUsize,
    pub clear_count: AtomicUsize,
    pub extra_items: Vec<CompletionItem>,
    pub diagnostics: Vec<Diagnostic>,
    pub hover_result: Option<Hover>,
}

#[async_trait]
impl MarkupEngine for MockMarkupEngine {
    fn install_grammar(&self, grammar: Vec<GrammarData>) {
        self.install_count.fetch_add(1, Ordering::SeqCst);
        *self.grammar.lock().unwrap() = grammar;
    }

    fn clear_grammar(&self) {
        self.clear_count.fetch_add(1, Ordering::SeqCst);
        self.grammar.lock().unwrap().clear();
    }

    /// Completion offers every tag and attribute of the installed grammar,
    /// carrying descriptions through the documentation field the way the
    /// real engine does.
    async fn complete(
        &self,
        _document: &TextDocument,
        _position: Position,
        _context: Option<CompletionContext>,
    ) -> Option<CompletionList> {
        let mut items: Vec<CompletionItem> = Vec::new();
        {
            let grammar = self.grammar.lock().unwrap();
            for data in grammar.iter() {
                for attr in &data.global_attributes {
                    items.push(CompletionItem {
                        label: attr.name.clone(),
                        documentation: attr.description.clone().map(Documentation::String),
                        ..CompletionItem::default()
                    });
                }
                for tag in &data.tags {
                    items.push(CompletionItem {
                        label: tag.name.clone(),
                        documentation: tag.description.clone().map(Documentation::String),
                        ..CompletionItem::default()
                    });
                    for attr in &tag.attributes {
                        items.push(CompletionItem {
                            label: attr.name.clone(),
                            documentation: attr.description.clone().map(Documentation::String),
                            ..CompletionItem::default()
                        });
                    }
                }
            }
        }
        items.extend(self.extra_items.iter().cloned());
        Some(CompletionList {
            is_incomplete: false,
            items,
        })
    }

    async fn hover(&self, _document: &TextDocument, _position: Position) -> Option<Hover> {
        self.hover_result.clone()
    }

    async fn validate(&self, _document: &TextDocument) -> Vec<Diagnostic> {
        self.diagnostics.clone()
    }

    fn scanner(&self, document: &TextDocument) -> Option<Box<dyn MarkupScanner>> {
        Some(Box::new(MockScanner::new(document.content())))
    }
}

/// A minimal tag tokenizer: reports start/end tag name tokens and nothing
/// else.
pub(crate) struct MockScanner {
    content: String,
    pos: usize,
    token_start: usize,
    token_len: usize,
}

impl MockScanner {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            pos: 0,
            token_start: 0,
            token_len: 0,
        }
    }
}

impl MarkupScanner for MockScanner {
    fn scan(&mut self) -> TokenKind {
        let bytes = self.content.as_bytes();
        while self.pos < bytes.len() {
            if bytes[self.pos] != b'<' {
                self.pos += 1;
                continue;
            }
            let mut i = self.pos + 1;
            let end_tag = i < bytes.len() && bytes[i] == b'/';
            if end_tag {
                i += 1;
            }
            let name_start = i;
            while i < bytes.len()
                && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b'.')
            {
                i += 1;
            }
            if i > name_start {
                self.token_start = name_start;
                self.token_len = i - name_start;
                self.pos = i;
                return if end_tag {
                    TokenKind::EndTag
                } else {
                    TokenKind::StartTag
                };
            }
            self.pos += 1;
        }
        TokenKind::Eos
    }

    fn token_offset(&self) -> u32 {
        u32::try_from(self.token_start).unwrap_or(u32::MAX)
    }

    fn token_length(&self) -> u32 {
        u32::try_from(self.token_len).unwrap_or(u32::MAX)
    }

    fn token_text(&self) -> &str {
        &self.content[self.token_start..self.token_start + self.token_len]
    }
}

/// The import statement every script-setup fixture starts with.
pub(crate) const SETUP_IMPORT_TEXT: &str = "import A from './A.vue'";

fn base_vue_doc(uri: &str, source_text: &str, data: TemplateData) -> VueDocument {
    let uri = Uri::from_str(uri).unwrap();
    let template_uri = Uri::from_str(&format!("{}.template", uri.as_str())).unwrap();
    VueDocument::new(
        uri.clone(),
        TextDocument::new(uri, source_text.to_string(), 1, LanguageId::Vue),
        TextDocument::new(template_uri, String::new(), 1, LanguageId::Html),
        data,
    )
}

fn identity_map(length: u32) -> SourceMap {
    SourceMap::new(vec![Mapping {
        generated: Span::new(0, length),
        source: Span::new(0, length),
    }])
}

pub(crate) fn vue_doc_without_script(uri: &str) -> Arc<VueDocument> {
    Arc::new(base_vue_doc(
        uri,
        "<template></template>\n",
        TemplateData {
            revision: 1,
            ..TemplateData::default()
        },
    ))
}

fn script_setup_parts(doc: VueDocument, uri: &str) -> VueDocument {
    let source_length = u32::try_from(doc.source().content().len()).unwrap_or(u32::MAX);
    doc.with_descriptor(SfcDescriptor {
        template: None,
        script: None,
        // Offset just past "<script setup>".
        script_setup: Some(SfcBlock { start_tag_end: 14 }),
    })
    .with_block_map(identity_map(source_length))
    .with_script_setup_ast(ScriptAst {
        imports: vec![ImportStatement {
            text: SETUP_IMPORT_TEXT.to_string(),
            end: 1 + u32::try_from(SETUP_IMPORT_TEXT.len()).unwrap(),
        }],
        export_default: None,
    })
    .with_script_document_uri(Uri::from_str(&format!("{uri}.script")).unwrap())
}

pub(crate) fn vue_doc_with_script_setup(uri: &str) -> Arc<VueDocument> {
    let source = format!("<script setup>\n{SETUP_IMPORT_TEXT}\n</script>\n");
    let doc = base_vue_doc(
        uri,
        &source,
        TemplateData {
            revision: 1,
            ..TemplateData::default()
        },
    );
    Arc::new(script_setup_parts(doc, uri))
}

pub(crate) fn vue_doc_with_plain_script(uri: &str) -> Arc<VueDocument> {
    let import_text = "import A from './A.vue';";
    let source =
        format!("<script>\n{import_text}\nexport default {{ components: {{ Foo }} }}\n</script>\n");
    let start_tag_end = 8u32;
    let source_length = u32::try_from(source.len()).unwrap();

    let components_literal = "{ Foo }";
    let components_offset =
        u32::try_from(source.find(components_literal).unwrap()).unwrap() - start_tag_end;
    let args_literal = "{ components: { Foo } }";
    let args_offset = u32::try_from(source.find(args_literal).unwrap()).unwrap() - start_tag_end;

    let doc = base_vue_doc(
        uri,
        &source,
        TemplateData {
            revision: 1,
            ..TemplateData::default()
        },
    )
    .with_descriptor(SfcDescriptor {
        template: None,
        script: Some(SfcBlock { start_tag_end }),
        script_setup: None,
    })
    .with_block_map(identity_map(source_length))
    .with_script_ast(ScriptAst {
        imports: vec![ImportStatement {
            text: import_text.to_string(),
            end: 1 + u32::try_from(import_text.len()).unwrap(),
        }],
        export_default: Some(ScriptExportDefault {
            args: Some(ObjectLiteral {
                span: Span::new(args_offset, u32::try_from(args_literal.len()).unwrap()),
                properties: vec!["components: { Foo }".to_string()],
            }),
            components_option: Some(ObjectLiteral {
                span: Span::new(
                    components_offset,
                    u32::try_from(components_literal.len()).unwrap(),
                ),
                properties: vec!["Foo".to_string()],
            }),
        }),
    })
    .with_script_document_uri(Uri::from_str(&format!("{uri}.script")).unwrap());
    Arc::new(doc)
}

/// A component document whose generated text carries discovery markers for
/// one component, paired with a typed engine primed to answer the probes.
pub(crate) fn fixture_with_component(
    name: &str,
    bind: Vec<CompletionItem>,
    on: Vec<CompletionItem>,
) -> (Arc<VueDocument>, MockTypedEngine) {
    let uri = "file:///app/Current.vue";
    let props_marker = markers::props_completion(name);
    let emit_marker = markers::emit_completion(name);
    let generated_content = format!(
        "{props_marker}\n{emit_marker}\n{}\n",
        markers::global_attrs()
    );

    let typed = MockTypedEngine::default();
    {
        let mut completions = typed.completions.lock().unwrap();
        let props_offset =
            u32::try_from(generated_content.find(&props_marker).unwrap() + props_marker.len())
                .unwrap();
        let emit_offset =
            u32::try_from(generated_content.find(&emit_marker).unwrap() + emit_marker.len())
                .unwrap();
        completions.insert(props_offset, bind);
        completions.insert(emit_offset, on);
    }

    let source = format!("<script setup>\n{SETUP_IMPORT_TEXT}\n</script>\n");
    let doc = base_vue_doc(
        uri,
        &source,
        TemplateData {
            revision: 1,
            component_items: vec![item(name)],
            components: vec![name.to_string()],
            tag_names: Vec::new(),
        },
    );
    let doc = script_setup_parts(doc, uri).with_generated(GeneratedDocument {
        uri: Uri::from_str(&format!("{uri}.generated")).unwrap(),
        content: generated_content,
    });
    (Arc::new(doc), typed)
}

pub(crate) fn bump_revision(doc: &VueDocument) -> VueDocument {
    let mut data = doc.template_data().clone();
    data.revision += 1;
    doc.clone().with_template_data(data)
}

#[derive(Default)]
pub(crate) struct BridgeFixture {
    pub typed: MockTypedEngine,
    pub markup: MockMarkupEngine,
    pub documents: Vec<Arc<VueDocument>>,
    pub settings: Settings,
}

pub(crate) fn bridge_fixture(fixture: BridgeFixture) -> TemplateBridge {
    let store = Arc::new(DocumentStore::new());
    for doc in fixture.documents {
        store.insert(doc);
    }
    TemplateBridge::new(
        Arc::new(fixture.typed),
        Arc::new(fixture.markup),
        Arc::new(fixture.settings),
        store,
        Utf8PathBuf::from("/app"),
    )
}
