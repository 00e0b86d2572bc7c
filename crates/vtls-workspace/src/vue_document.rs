//! A single-file component and everything the compiler derived from it.

use lsp_types::Uri;

use crate::document::TextDocument;
use crate::script::ScriptAst;
use crate::sfc::CompiledTemplate;
use crate::sfc::GeneratedDocument;
use crate::sfc::SfcDescriptor;
use crate::sfc::TemplateData;
use crate::source_map::SourceMap;

#[derive(Debug, Clone)]
pub struct VueDocument {
    uri: Uri,
    source: TextDocument,
    template_document: TextDocument,
    descriptor: SfcDescriptor,
    template_data: TemplateData,
    generated: Option<GeneratedDocument>,
    script_document_uri: Option<Uri>,
    compiled_template: Option<CompiledTemplate>,
    block_map: SourceMap,
    script_ast: Option<ScriptAst>,
    script_setup_ast: Option<ScriptAst>,
}

impl VueDocument {
    #[must_use]
    pub fn new(
        uri: Uri,
        source: TextDocument,
        template_document: TextDocument,
        template_data: TemplateData,
    ) -> Self {
        Self {
            uri,
            source,
            template_document,
            descriptor: SfcDescriptor::default(),
            template_data,
            generated: None,
            script_document_uri: None,
            compiled_template: None,
            block_map: SourceMap::default(),
            script_ast: None,
            script_setup_ast: None,
        }
    }

    #[must_use]
    pub fn with_template_data(mut self, template_data: TemplateData) -> Self {
        self.template_data = template_data;
        self
    }

    #[must_use]
    pub fn with_descriptor(mut self, descriptor: SfcDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    #[must_use]
    pub fn with_generated(mut self, generated: GeneratedDocument) -> Self {
        self.generated = Some(generated);
        self
    }

    #[must_use]
    pub fn with_script_document_uri(mut self, uri: Uri) -> Self {
        self.script_document_uri = Some(uri);
        self
    }

    #[must_use]
    pub fn with_compiled_template(mut self, compiled: CompiledTemplate) -> Self {
        self.compiled_template = Some(compiled);
        self
    }

    #[must_use]
    pub fn with_block_map(mut self, block_map: SourceMap) -> Self {
        self.block_map = block_map;
        self
    }

    #[must_use]
    pub fn with_script_ast(mut self, ast: ScriptAst) -> Self {
        self.script_ast = Some(ast);
        self
    }

    #[must_use]
    pub fn with_script_setup_ast(mut self, ast: ScriptAst) -> Self {
        self.script_setup_ast = Some(ast);
        self
    }

    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    #[must_use]
    pub fn source(&self) -> &TextDocument {
        &self.source
    }

    #[must_use]
    pub fn template_document(&self) -> &TextDocument {
        &self.template_document
    }

    #[must_use]
    pub fn descriptor(&self) -> &SfcDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn template_data(&self) -> &TemplateData {
        &self.template_data
    }

    #[must_use]
    pub fn generated(&self) -> Option<&GeneratedDocument> {
        self.generated.as_ref()
    }

    #[must_use]
    pub fn script_document_uri(&self) -> Option<&Uri> {
        self.script_document_uri.as_ref()
    }

    #[must_use]
    pub fn compiled_template(&self) -> Option<&CompiledTemplate> {
        self.compiled_template.as_ref()
    }

    #[must_use]
    pub fn block_map(&self) -> &SourceMap {
        &self.block_map
    }

    #[must_use]
    pub fn script_ast(&self) -> Option<&ScriptAst> {
        self.script_ast.as_ref()
    }

    #[must_use]
    pub fn script_setup_ast(&self) -> Option<&ScriptAst> {
        self.script_setup_ast.as_ref()
    }
}
