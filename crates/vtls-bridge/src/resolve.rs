//! Deferred resolution of completion items.
//!
//! Items carry a [`ResolveData`] payload in their opaque `data` field.
//! Grammar-identified items are enriched through the typed engine's resolver;
//! auto-import items get their import and component-registration edits
//! computed here, on demand, against the current document snapshot.

use lsp_types::CompletionItem;
use lsp_types::CompletionItemLabelDetails;
use lsp_types::Documentation;
use lsp_types::MarkupContent;
use lsp_types::MarkupKind;
use lsp_types::Range;
use lsp_types::TextEdit;
use serde::Deserialize;
use serde::Serialize;
use vtls_workspace::paths;
use vtls_workspace::ImportStatement;
use vtls_workspace::ObjectLiteral;
use vtls_workspace::ScriptAst;
use vtls_workspace::VueDocument;

use camino::Utf8Path;

use crate::casing::camelize;
use crate::casing::pascal_case;
use crate::TemplateBridge;

/// The payload attached to completion items during post-processing and read
/// back when the client asks to resolve one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ResolveData {
    /// Item came from the synthesized grammar; `ts_item` is the typed
    /// engine's original item, when one backed it.
    #[serde(rename_all = "camelCase")]
    Grammar { ts_item: Option<CompletionItem> },
    /// Item offers to import another document as a component.
    #[serde(rename_all = "camelCase")]
    AutoImport {
        source_document_uri: String,
        import_uri: String,
    },
}

/// An import statement from the typed engine's code action, plus the
/// action's human-readable description.
struct ImportText {
    text: String,
    description: String,
}

impl TemplateBridge {
    pub(crate) async fn resolve_grammar_item(
        &self,
        mut item: CompletionItem,
        ts_item: Option<CompletionItem>,
    ) -> CompletionItem {
        let Some(ts_item) = ts_item else {
            return item;
        };
        let resolved = match self.typed.resolve_completion(ts_item).await {
            Ok(resolved) => resolved,
            Err(error) => {
                tracing::debug!(%error, label = %item.label, "typed resolve failed");
                return item;
            }
        };

        if let Some(tags) = resolved.tags {
            item.tags.get_or_insert_with(Vec::new).extend(tags);
        }

        let details: Vec<String> = [item.detail.take(), resolved.detail]
            .into_iter()
            .flatten()
            .collect();
        if !details.is_empty() {
            item.detail = Some(details.join("\n\n"));
        }

        let docs: Vec<String> = [
            doc_text(item.documentation.as_ref()),
            doc_text(resolved.documentation.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !docs.is_empty() {
            item.documentation = Some(Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value: docs.join("\n\n"),
            }));
        }

        item
    }

    pub(crate) async fn resolve_auto_import_item(
        &self,
        mut item: CompletionItem,
        source_uri: &str,
        import_uri: &str,
    ) -> CompletionItem {
        let Some(vue_doc) = self.documents.get(source_uri) else {
            return item;
        };
        let Some(import_file) = paths::uri_to_path(import_uri) else {
            return item;
        };
        let Some(source_path) = paths::uri_to_path(vue_doc.uri().as_str()) else {
            return item;
        };

        let r_path = paths::relative_path(&self.workspace_root, &import_file).to_string();
        let source_dir = source_path.parent().unwrap_or(Utf8Path::new(""));
        let mut import_path = paths::relative_path(source_dir, &import_file).to_string();
        if !import_path.starts_with('.') {
            import_path = format!("./{import_path}");
        }

        let descriptor = vue_doc.descriptor();
        if descriptor.script.is_none() && descriptor.script_setup.is_none() {
            item.detail = Some(format!("Auto import from '{import_path}'\n\n{r_path}"));
            item.documentation = Some(Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value: "[Error] `<script>` / `<script setup>` block not found.".to_string(),
            }));
            return item;
        }

        item.label_details = Some(CompletionItemLabelDetails {
            detail: None,
            description: Some(r_path.clone()),
        });

        let component_name = pascal_case(&item.label.replace('.', "-"));
        let script_import = vue_doc.script_ast().and_then(ScriptAst::last_import);
        let setup_import = vue_doc.script_setup_ast().and_then(ScriptAst::last_import);

        // Only an engine action description replaces the item detail; the
        // hand-built fallback leaves it untouched.
        let insert = match self
            .typed_import_text(&vue_doc, &import_file, &component_name)
            .await
        {
            Some(insert) => {
                if !insert.description.is_empty() {
                    item.detail = Some(format!("{}\n\n{r_path}", insert.description));
                }
                insert.text
            }
            None => fallback_import_text(
                setup_import.or(script_import),
                &component_name,
                &import_path,
            ),
        };

        let mut edits = Vec::new();
        if let Some(setup) = &descriptor.script_setup {
            if let Some(block_start) = vue_doc.block_map().source_offset(setup.start_tag_end) {
                let offset = block_start + setup_import.map_or(0, |import| import.end);
                let position = vue_doc.source().offset_to_position(offset);
                self.record_edit_position(position);
                edits.push(TextEdit {
                    range: Range::new(position, position),
                    new_text: format!("\n{insert}"),
                });
            }
        } else if let (Some(script), Some(ast)) = (&descriptor.script, vue_doc.script_ast()) {
            if let Some(block_start) = vue_doc.block_map().source_offset(script.start_tag_end) {
                let offset = block_start + script_import.map_or(0, |import| import.end);
                let position = vue_doc.source().offset_to_position(offset);
                self.record_edit_position(position);
                edits.push(TextEdit {
                    range: Range::new(position, position),
                    new_text: format!("\n{insert}"),
                });

                if let Some(edit) =
                    self.registration_edit(&vue_doc, ast, block_start, &component_name)
                {
                    edits.push(edit);
                }
            }
        }

        if !edits.is_empty() {
            item.additional_text_edits = Some(edits);
        }
        item
    }

    /// Re-print the options object (or its `components` option) with the new
    /// component registered.
    fn registration_edit(
        &self,
        vue_doc: &VueDocument,
        ast: &ScriptAst,
        block_start: u32,
        component_name: &str,
    ) -> Option<TextEdit> {
        let export = ast.export_default.as_ref()?;
        let (object, printed) = if let Some(object) = &export.components_option {
            (object, print_object_with(object, component_name))
        } else if let Some(object) = &export.args {
            (
                object,
                print_object_with(object, &format!("components: {{ {component_name} }}")),
            )
        } else {
            return None;
        };

        let start = vue_doc
            .source()
            .offset_to_position(block_start + object.span.start());
        let end = vue_doc
            .source()
            .offset_to_position(block_start + object.span.end());
        self.record_edit_position(start);
        self.record_edit_position(end);
        Some(TextEdit {
            range: Range::new(start, end),
            new_text: decode_unicode_escapes(&printed),
        })
    }

    /// Ask the typed engine for a real auto-import code action against the
    /// script document and rewrite its bound name to the component name.
    async fn typed_import_text(
        &self,
        vue_doc: &VueDocument,
        import_file: &Utf8Path,
        component_name: &str,
    ) -> Option<ImportText> {
        let script_uri = vue_doc.script_document_uri()?;
        let file_name = import_file.file_name()?;
        let symbol = camelize(&file_name.replace('.', "-"));

        let action = match self
            .typed
            .import_code_action(script_uri, &symbol, import_file)
            .await
        {
            Ok(action) => action?,
            Err(error) => {
                tracing::debug!(%error, "typed import code action failed");
                return None;
            }
        };

        let needle = format!("import {symbol} ");
        let replacement = format!("import {component_name} ");
        action
            .text_changes
            .iter()
            .find(|change| change.contains(&needle))
            .map(|change| ImportText {
                text: change.replace(&needle, &replacement).trim().to_string(),
                description: action.description.clone(),
            })
    }
}

fn doc_text(doc: Option<&Documentation>) -> Option<String> {
    match doc {
        Some(Documentation::String(text)) => Some(text.clone()),
        Some(Documentation::MarkupContent(markup)) => Some(markup.value.clone()),
        None => None,
    }
}

/// Build an import statement by hand, inferring quote and semicolon style
/// from an existing import when one exists.
fn fallback_import_text(
    reference: Option<&ImportStatement>,
    component_name: &str,
    import_path: &str,
) -> String {
    let (quote, semicolon) = reference.map_or(('"', true), |import| {
        let quote = if import.text.contains('\'') { '\'' } else { '"' };
        (quote, import.text.trim_end().ends_with(';'))
    });
    let mut text = format!("import {component_name} from {quote}{import_path}{quote}");
    if semicolon {
        text.push(';');
    }
    text
}

fn print_object_with(object: &ObjectLiteral, property: &str) -> String {
    let mut parts: Vec<&str> = object.properties.iter().map(String::as_str).collect();
    parts.push(property);
    format!("{{ {} }}", parts.join(", "))
}

/// Replace `\uXXXX` escape sequences with the characters they denote.
/// Malformed sequences are left as-is.
fn decode_unicode_escapes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(index) = rest.find("\\u") {
        result.push_str(&rest[..index]);
        let decoded = rest
            .get(index + 2..index + 6)
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);
        match decoded {
            Some(c) => {
                result.push(c);
                rest = &rest[index + 6..];
            }
            None => {
                result.push_str("\\u");
                rest = &rest[index + 2..];
            }
        }
    }
    result.push_str(rest);
    result
}
